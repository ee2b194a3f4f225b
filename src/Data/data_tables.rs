use super::DataError;
use super::elements::ElementTable;
use super::pair_enthalpy::{PairTable, PairTableKind};
use crate::library_manager::with_library_manager;
use log::info;
use std::sync::OnceLock;

/// The three reference tables the calculator reads from.
/// Built once and shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct DataTables {
    pub elements: ElementTable,
    pub mixing_enthalpy: PairTable,
    pub formation_enthalpy: PairTable,
}

static GLOBAL_TABLES: OnceLock<DataTables> = OnceLock::new();

impl DataTables {
    pub fn new(
        elements: ElementTable,
        mixing_enthalpy: PairTable,
        formation_enthalpy: PairTable,
    ) -> Self {
        Self {
            elements,
            mixing_enthalpy,
            formation_enthalpy,
        }
    }

    /// tables embedded in the binary
    pub fn builtin() -> Result<Self, DataError> {
        Ok(Self::new(
            ElementTable::builtin()?,
            PairTable::builtin(PairTableKind::MixingEnthalpy)?,
            PairTable::builtin(PairTableKind::FormationEnthalpy)?,
        ))
    }

    /// Process-wide tables, loaded on first call according to the library configuration.
    /// A failed load is returned to the caller and retried on the next call.
    pub fn global() -> Result<&'static DataTables, DataError> {
        if let Some(tables) = GLOBAL_TABLES.get() {
            return Ok(tables);
        }
        let tables = with_library_manager(|manager| manager.load_tables())?;
        info!(
            "reference tables loaded: {} elements, {} mixing pairs, {} formation pairs",
            tables.elements.len(),
            tables.mixing_enthalpy.len(),
            tables.formation_enthalpy.len()
        );
        Ok(GLOBAL_TABLES.get_or_init(|| tables))
    }
}
