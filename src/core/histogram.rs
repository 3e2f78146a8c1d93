use std::io::{self, Write};

/**
 * Counts how many pixels produced each divergence value. Bin `i` holds the
 * count for result `i`; results above `max_value` land in the last bin.
 */
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub bin_count: Vec<u32>,
}

impl Histogram {
    /// One bin per value in `[0, max_value]`.
    pub fn new(max_value: u32) -> Self {
        Histogram {
            bin_count: vec![0; max_value as usize + 1],
        }
    }

    pub fn insert(&mut self, value: u32) {
        let index = (value as usize).min(self.bin_count.len() - 1);
        self.bin_count[index] += 1;
    }

    pub fn total_count(&self) -> u32 {
        self.bin_count.iter().sum()
    }

    pub fn max_value(&self) -> u32 {
        (self.bin_count.len() - 1) as u32
    }

    /// Value with the largest count; ties resolve to the smaller value.
    pub fn mode(&self) -> Option<u32> {
        if self.total_count() == 0 {
            return None;
        }
        let mut best = 0;
        for (index, count) in self.bin_count.iter().enumerate() {
            if *count > self.bin_count[best] {
                best = index;
            }
        }
        Some(best as u32)
    }

    /// Print the histogram stats to the writer.
    pub fn display<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Histogram:")?;
        let mode = match self.mode() {
            Some(value) => value.to_string(),
            None => "none".to_owned(),
        };
        writeln!(
            writer,
            "  max_value: {}, total_count: {}, mode: {}",
            self.max_value(),
            self.total_count(),
            mode
        )?;
        for (value, count) in self.bin_count.iter().enumerate() {
            writeln!(writer, "    value: {:>4}, count: {}", value, count)?;
        }
        Ok(())
    }
}
