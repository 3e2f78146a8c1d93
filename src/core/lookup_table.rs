use iter_num_tools::lin_space;
use more_asserts::{assert_ge, assert_gt};

/**
 * Precomputed samples of a function on a uniform grid over `query_domain`.
 * Queries are rounded to the nearest sample and clamped to the domain.
 */
pub struct LookupTable<T> {
    table_entries: Vec<T>,
    query_offset: f32,
    query_to_index_scale: f32,
}

impl<T: Clone> LookupTable<T> {
    pub fn new<F>(query_domain: [f32; 2], entry_count: usize, query_to_data: F) -> LookupTable<T>
    where
        F: Fn(f32) -> T,
    {
        assert_gt!(entry_count, 1);
        assert_ge!(query_domain[1], query_domain[0]);
        let table_entries = lin_space(query_domain[0]..=query_domain[1], entry_count)
            .map(query_to_data)
            .collect();

        let span = query_domain[1] - query_domain[0];
        let query_to_index_scale = if span > 0.0 {
            ((entry_count - 1) as f32) / span
        } else {
            0.0
        };
        LookupTable {
            table_entries,
            query_offset: query_domain[0],
            query_to_index_scale,
        }
    }

    pub fn lookup(&self, query: f32) -> T {
        let index = ((query - self.query_offset) * self.query_to_index_scale).round();
        let max_index = (self.table_entries.len() - 1) as f32;
        self.table_entries[index.clamp(0.0, max_index) as usize].clone()
    }
}
