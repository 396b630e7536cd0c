//! A leaf executor that yields a fixed, in-memory list of rows. Not part
//! of the original executor set; added so inserts and other tests have a
//! trivial producer to sit under them instead of requiring a pre-seeded
//! table.

use talondb_core::Rid;

use crate::executor::Executor;
use crate::tuple::{Schema, Tuple};

/// Yields a fixed list of tuples, one per `next()` call, in the order
/// given.
pub struct ValuesExecutor {
    schema: Schema,
    rows: Vec<Tuple>,
    pos: usize,
}

impl ValuesExecutor {
    #[must_use]
    pub fn new(schema: Schema, rows: Vec<Tuple>) -> Self {
        Self { schema, rows, pos: 0 }
    }
}

impl Executor for ValuesExecutor {
    fn init(&mut self) {
        self.pos = 0;
    }

    fn next(&mut self) -> Option<(Tuple, Rid)> {
        let tuple = self.rows.get(self.pos)?.clone();
        let rid = Rid::new(0, u32::try_from(self.pos).ok()?);
        self.pos += 1;
        Some((tuple, rid))
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }
}
