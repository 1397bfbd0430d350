//! Quantity catalog: immutable name → [`Quantity`] table.
//!
//! The built-in table is assembled once on first use and shared behind an
//! `Arc`. Entries are only ever handed out by shared reference, so no caller
//! can mutate a quantity's dimension mapping after construction. Iteration
//! order is insertion order; the suggestion engine relies on it to break ties.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use crate::dimension::Dimension::{
    Amount as N, Charge as Q, Length as L, Mass as M, Temperature as TH, Time as T,
};
use crate::dimension::{Dimension, DimensionVector};
use crate::error::{CatalogError, DiscoveryError, DiscoveryResult};
use crate::quantity::Quantity;

/// Read-only registry of named quantities.
#[derive(Debug, Clone)]
pub struct QuantityCatalog {
    entries: Vec<Quantity>,
    by_name: HashMap<String, usize>,
}

static BUILTIN: OnceLock<Arc<QuantityCatalog>> = OnceLock::new();

impl QuantityCatalog {
    /// Assemble a catalog, rejecting duplicate or empty names.
    pub fn from_quantities(
        quantities: impl IntoIterator<Item = Quantity>,
    ) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        let mut by_name = HashMap::new();
        for quantity in quantities {
            if quantity.name().is_empty() {
                return Err(CatalogError::EmptyName {
                    symbol: quantity.symbol().to_string(),
                });
            }
            if by_name.contains_key(quantity.name()) {
                return Err(CatalogError::DuplicateQuantity {
                    name: quantity.name().to_string(),
                });
            }
            by_name.insert(quantity.name().to_string(), entries.len());
            entries.push(quantity);
        }
        Ok(Self { entries, by_name })
    }

    /// The shared built-in catalog, built on first call.
    pub fn builtin() -> Arc<QuantityCatalog> {
        Arc::clone(BUILTIN.get_or_init(|| {
            let entries = builtin_quantities();
            let by_name = entries
                .iter()
                .enumerate()
                .map(|(i, q)| (q.name().to_string(), i))
                .collect();
            Arc::new(QuantityCatalog { entries, by_name })
        }))
    }

    /// Look up a quantity by exact name.
    pub fn lookup(&self, name: &str) -> DiscoveryResult<&Quantity> {
        self.get(name).ok_or_else(|| DiscoveryError::UnknownQuantity {
            name: name.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Resolve every name or fail on the first unknown one; no partial result.
    pub fn resolve<'a, S: AsRef<str>>(&'a self, names: &[S]) -> DiscoveryResult<Vec<&'a Quantity>> {
        names.iter().map(|n| self.lookup(n.as_ref())).collect()
    }

    /// Sorted set of dimensions used by any of `quantities`.
    pub fn all_dimensions(quantities: &[&Quantity]) -> BTreeSet<Dimension> {
        quantities
            .iter()
            .flat_map(|q| q.dimensions().dimensions())
            .collect()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Quantity> {
        self.entries.iter()
    }

    /// Entries whose name, symbol or description contains `filter`
    /// (case-insensitive), sorted by name.
    pub fn search(&self, filter: &str) -> Vec<&Quantity> {
        let needle = filter.to_lowercase();
        let mut hits: Vec<&Quantity> = self
            .entries
            .iter()
            .filter(|q| {
                needle.is_empty()
                    || q.name().to_lowercase().contains(&needle)
                    || q.symbol().to_lowercase().contains(&needle)
                    || q.description().to_lowercase().contains(&needle)
            })
            .collect();
        hits.sort_by(|a, b| a.name().cmp(b.name()));
        hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn q(name: &str, symbol: &str, dims: &[(Dimension, i64)], description: &str) -> Quantity {
    Quantity::new(name, symbol, DimensionVector::from_pairs(dims), description)
}

#[rustfmt::skip]
fn builtin_quantities() -> Vec<Quantity> {
    vec![
        q("dimensionless", "D", &[], "dimensionless"),
        q("length", "L", &[(L, 1)], "Spatial dimension"),
        q("mass", "m", &[(M, 1)], "Measure of matter"),
        q("i_mass", "m_i", &[(M, -1)], "Inverse measure of matter"),
        q("time", "t", &[(T, 1)], "Temporal dimension"),
        q("temperature", "T_temp", &[(TH, 1)], "Thermal energy scale"),
        q("charge", "q", &[(Q, 1)], "Electric charge"),
        q("amount", "n", &[(N, 1)], "Amount of substance"),
        q("volume", "vol", &[(L, 3)], "Volume of substance"),
        q("area", "area", &[(L, 2)], "Area of substance"),
        q("velocity", "v", &[(L, 1), (T, -1)], "Rate of position change"),
        q("acceleration", "a", &[(L, 1), (T, -2)], "Rate of velocity change"),
        q("force", "F", &[(M, 1), (L, 1), (T, -2)], "Interaction causing acceleration"),
        q("energy", "E", &[(M, 1), (L, 2), (T, -2)], "Capacity to do work"),
        q("power", "P", &[(M, 1), (L, 2), (T, -3)], "Rate of energy transfer"),
        q("pressure", "Pres", &[(M, 1), (L, -1), (T, -2)], "Pressure"),
        q("density", "rho", &[(M, 1), (L, -3)], "Density"),
        q("momentum", "p", &[(M, 1), (L, 1), (T, -1)], "Mass times velocity"),
        q("angular_momentum", "L_ang", &[(M, 1), (L, 2), (T, -1)], "Rotational momentum"),
        q("e-tensor", "G_uv", &[(L, -2)], "Einstein tensor"),
        q("se-tensor", "T_uv", &[(M, 1), (L, -1), (T, -2)], "Stress-energy tensor"),
        q("frequency", "f", &[(T, -1)], "Oscillations per unit time"),
        q("wavelength", "λ", &[(L, 1)], "Spatial period of wave"),
        q("wavenumber", "k", &[(L, -1)], "Spatial frequency"),
        q("action", "S", &[(M, 1), (L, 2), (T, -1)], "Energy-time integral"),
        q("entropy", "S_ent", &[(M, 1), (L, 2), (T, -2), (TH, -1)], "Measure of disorder"),
        q("heat_capacity", "C_heat", &[(M, 1), (L, 2), (T, -2), (TH, -1)], "Heat required per temperature change"),
        q("electric_field", "E_field", &[(M, 1), (L, 1), (T, -3), (Q, -1)], "Force per unit charge"),
        q("magnetic_field", "B", &[(M, 1), (T, -2), (Q, -1)], "Magnetic flux density"),
        q("voltage", "V", &[(M, 1), (L, 2), (T, -3), (Q, -1)], "Electric potential difference"),
        q("current", "I", &[(Q, 1), (T, -1)], "Rate of charge flow"),
        q("resistance", "R_elec", &[(M, 1), (L, 2), (T, -3), (Q, -2)], "Opposition to current flow"),
        q("capacitance", "C_cap", &[(M, -1), (L, -2), (T, 4), (Q, 2)], "Charge storage capacity"),
        q("planck_constant", "h", &[(M, 1), (L, 2), (T, -1)], "Quantum of action"),
        q("reduced_planck", "ℏ", &[(M, 1), (L, 2), (T, -1)], "h/2π"),
        q("boltzmann_constant", "k_B", &[(M, 1), (L, 2), (T, -2), (TH, -1)], "Thermal energy scale"),
        q("speed_of_light", "c", &[(L, 1), (T, -1)], "Universal speed limit"),
        q("speed_of_light_cubed", "c^3", &[(L, 3), (T, -3)], "Universal speed limit cubed"),
        q("gravitational_constant", "G", &[(M, -1), (L, 3), (T, -2)], "Gravity coupling constant"),
        q("gas_constant", "R_gas", &[(M, 1), (L, 2), (T, -2), (TH, -1), (N, -1)], "Universal gas constant"),
        q("avogadro_number", "N_A", &[(N, -1)], "Particles per mole"),
        q("elementary_charge", "e", &[(Q, 1)], "Fundamental charge unit"),
        q("vacuum_permittivity", "ε₀", &[(M, -1), (L, -3), (T, 4), (Q, 2)], "Electric constant"),
        q("vacuum_permeability", "μ₀", &[(M, 1), (L, 1), (T, -2), (Q, -2)], "Magnetic constant"),
        q("fine_structure", "α", &[], "Electromagnetic coupling constant"),
        q("electron_mass", "m_e", &[(M, 1)], "Mass of electron"),
        q("proton_mass", "m_p", &[(M, 1)], "Mass of proton"),
    ]
}
