use tokio_postgres::types::ToSql;

/// One bound statement parameter. Cells are nullable text, so a parameter
/// is always an `Option<String>` bound as TEXT; absent cells bind as SQL
/// NULL.
pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    pub fn from_cell(cell: Option<String>) -> Self {
        PgParam(Box::new(cell))
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_cells(cells: &[Option<String>]) -> Self {
        Self {
            params: cells
                .iter()
                .map(|cell| PgParam::from_cell(cell.clone()))
                .collect(),
        }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}
