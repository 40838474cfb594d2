//! Display options for rigged configurations.

/// How the partitions of an element are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Layout {
    /// One partition below the other, separated by blank lines.
    #[default]
    Vertical,
    /// Partitions side by side.
    Horizontal,
}

/// Row order within a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Convention {
    /// Longest row on top.
    #[default]
    English,
    /// Longest row at the bottom.
    French,
}

/// Configuration for printing rigged configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayOptions {
    /// Arrangement of partitions
    pub layout: Layout,
    /// Row order inside each partition
    pub convention: Convention,
}

impl DisplayOptions {
    pub fn horizontal(mut self) -> Self {
        self.layout = Layout::Horizontal;
        self
    }

    pub fn french(mut self) -> Self {
        self.convention = Convention::French;
        self
    }
}

/// Columns separating partitions in the horizontal layout.
pub(crate) const HORIZONTAL_GAP: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_vertical_english() {
        let options = DisplayOptions::default();
        assert_eq!(options.layout, Layout::Vertical);
        assert_eq!(options.convention, Convention::English);
    }

    #[test]
    fn builders_compose() {
        let options = DisplayOptions::default().horizontal().french();
        assert_eq!(options.layout, Layout::Horizontal);
        assert_eq!(options.convention, Convention::French);
    }
}
