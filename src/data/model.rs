use std::fmt;

// ---------------------------------------------------------------------------
// Observable – the two quantities compared against the infinite-size limit
// ---------------------------------------------------------------------------

/// One of the two physical observables carried by every data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observable {
    FreeEnergy,
    Energy,
}

impl Observable {
    pub const ALL: [Observable; 2] = [Observable::FreeEnergy, Observable::Energy];

    /// Legend label used by both the PDF export and the viewer.
    pub fn label(self) -> &'static str {
        match self {
            Observable::FreeEnergy => "finite-size error of free energy density",
            Observable::Energy => "finite-size error of energy density",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Observable::FreeEnergy => "free energy",
            Observable::Energy => "energy",
        }
    }
}

// ---------------------------------------------------------------------------
// Columns – where the observables live in a row
// ---------------------------------------------------------------------------

/// Zero-based column indices of the observables. Column 0 is always the row tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub free_energy: usize,
    pub energy: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            free_energy: 6,
            energy: 7,
        }
    }
}

impl Columns {
    /// Minimum number of whitespace fields a reference or data row must carry.
    pub fn min_fields(&self) -> usize {
        self.free_energy.max(self.energy) + 1
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Observables of the infinite-size (`inf`) row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    pub free_energy: f64,
    pub energy: f64,
}

impl Reference {
    pub fn value(&self, observable: Observable) -> f64 {
        match observable {
            Observable::FreeEnergy => self.free_energy,
            Observable::Energy => self.energy,
        }
    }
}

/// Observables of one finite lattice size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub size: u64,
    pub free_energy: f64,
    pub energy: f64,
}

// ---------------------------------------------------------------------------
// Dataset – everything parsed from one results file
// ---------------------------------------------------------------------------

/// A parsed results file: the reference row plus the finite-size rows in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub reference: Reference,
    pub observations: Vec<Observation>,
}

impl Dataset {
    /// Number of finite-size rows.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Absolute deviation of every row from the reference, in file order.
    pub fn finite_size_errors(&self) -> FiniteSizeErrors {
        let mut errors = FiniteSizeErrors::with_capacity(self.len());
        for obs in &self.observations {
            errors.sizes.push(obs.size);
            errors
                .free_energy
                .push((obs.free_energy - self.reference.free_energy).abs());
            errors
                .energy
                .push((obs.energy - self.reference.energy).abs());
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// FiniteSizeErrors – the three parallel output sequences
// ---------------------------------------------------------------------------

/// `sizes[i]`, `free_energy[i]` and `energy[i]` all belong to the i-th data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiniteSizeErrors {
    pub sizes: Vec<u64>,
    pub free_energy: Vec<f64>,
    pub energy: Vec<f64>,
}

impl FiniteSizeErrors {
    fn with_capacity(n: usize) -> Self {
        FiniteSizeErrors {
            sizes: Vec::with_capacity(n),
            free_energy: Vec::with_capacity(n),
            energy: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn series(&self, observable: Observable) -> &[f64] {
        match observable {
            Observable::FreeEnergy => &self.free_energy,
            Observable::Energy => &self.energy,
        }
    }

    /// `(L, error)` pairs that can be placed on log-log axes.
    ///
    /// A zero error (row equal to the reference) has no logarithm and is left out.
    pub fn plottable_points(&self, observable: Observable) -> Vec<(f64, f64)> {
        self.sizes
            .iter()
            .zip(self.series(observable))
            .map(|(&l, &err)| (l as f64, err))
            .filter(|&(l, err)| l > 0.0 && err > 0.0 && err.is_finite())
            .collect()
    }
}

impl fmt::Display for FiniteSizeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.sizes)?;
        writeln!(f, "{:?}", self.free_energy)?;
        write!(f, "{:?}", self.energy)
    }
}
