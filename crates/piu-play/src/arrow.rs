/// Color a lane's arrows are drawn in. The renderer maps these to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowColor {
    Red,
    Blue,
    Yellow,
}

/// Visual variant of a lane. Only affects drawing; every kind is judged the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    DownLeft,
    UpLeft,
    Center,
    UpRight,
    DownRight,
}

impl ArrowKind {
    /// Pad order, left to right.
    pub const ALL: [ArrowKind; 5] = [
        ArrowKind::DownLeft,
        ArrowKind::UpLeft,
        ArrowKind::Center,
        ArrowKind::UpRight,
        ArrowKind::DownRight,
    ];

    /// Kind for column `index`. Charts wider than one pad repeat the pattern.
    pub fn for_column(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn symbol(self) -> char {
        match self {
            Self::DownLeft => '🡿',
            Self::UpLeft => '🡼',
            Self::Center => '⧆',
            Self::UpRight => '🡽',
            Self::DownRight => '🡾',
        }
    }

    pub fn color(self) -> ArrowColor {
        match self {
            Self::DownLeft | Self::DownRight => ArrowColor::Red,
            Self::UpLeft | Self::UpRight => ArrowColor::Blue,
            Self::Center => ArrowColor::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_cycle_through_pad() {
        assert_eq!(ArrowKind::for_column(0), ArrowKind::DownLeft);
        assert_eq!(ArrowKind::for_column(2), ArrowKind::Center);
        assert_eq!(ArrowKind::for_column(4), ArrowKind::DownRight);
        assert_eq!(ArrowKind::for_column(5), ArrowKind::DownLeft);
        assert_eq!(ArrowKind::for_column(7), ArrowKind::Center);
    }

    #[test]
    fn symbols_are_distinct() {
        let mut symbols: Vec<char> = ArrowKind::ALL.iter().map(|k| k.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 5);
    }

    #[test]
    fn center_is_yellow() {
        assert_eq!(ArrowKind::Center.color(), ArrowColor::Yellow);
        assert_eq!(ArrowKind::DownLeft.color(), ArrowColor::Red);
        assert_eq!(ArrowKind::UpRight.color(), ArrowColor::Blue);
    }
}
