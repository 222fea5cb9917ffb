use std::fmt;

/// Cell coordinate (0-indexed internally)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Default)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        CellCoord { row, col }
    }

    /// Create from A1 notation (e.g., "A1" -> (0, 0), "B2" -> (1, 1))
    pub fn from_a1(notation: &str) -> Option<Self> {
        let notation = notation.trim();
        let split = notation
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(notation.len());
        let (letters, digits) = notation.split_at(split);

        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let col = col_from_label(letters)?;
        let row: usize = digits.parse().ok()?;

        // Rows are 1-indexed in A1 notation
        let row = row.checked_sub(1)?;
        Some(CellCoord { row, col })
    }

    /// Parse a storage key: either `"row,col"` (0-indexed) or A1 notation
    pub fn from_key(key: &str) -> Option<Self> {
        match key.split_once(',') {
            Some((row, col)) => Some(CellCoord::new(
                row.trim().parse().ok()?,
                col.trim().parse().ok()?,
            )),
            None => CellCoord::from_a1(key),
        }
    }

    /// Storage key in `"row,col"` form
    pub fn to_key(&self) -> String {
        format!("{},{}", self.row, self.col)
    }

    /// Convert to A1 notation (e.g., (0, 0) -> "A1")
    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_label(self.col), self.row + 1)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: usize) -> String {
    let mut label = Vec::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    label.iter().rev().map(|&b| char::from(b)).collect()
}

/// Convert column label (A, B, ..., Z, AA, AB, ...) to index (0-indexed)
pub fn col_from_label(label: &str) -> Option<usize> {
    let mut col: usize = 0;

    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }

    col.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_label() {
        assert_eq!(col_to_label(0), "A");
        assert_eq!(col_to_label(25), "Z");
        assert_eq!(col_to_label(26), "AA");
        assert_eq!(col_to_label(27), "AB");
        assert_eq!(col_to_label(701), "ZZ");
        assert_eq!(col_to_label(702), "AAA");
    }

    #[test]
    fn test_col_from_label() {
        assert_eq!(col_from_label("A"), Some(0));
        assert_eq!(col_from_label("z"), Some(25));
        assert_eq!(col_from_label("AA"), Some(26));
        assert_eq!(col_from_label("ZZ"), Some(701));
        assert_eq!(col_from_label(""), None);
        assert_eq!(col_from_label("A1"), None);
    }

    #[test]
    fn test_coord_a1() {
        assert_eq!(CellCoord::from_a1("A1"), Some(CellCoord::new(0, 0)));
        assert_eq!(CellCoord::from_a1("b2"), Some(CellCoord::new(1, 1)));

        let coord = CellCoord::from_a1("AA100").unwrap();
        assert_eq!(coord, CellCoord::new(99, 26));
        assert_eq!(coord.to_a1(), "AA100");

        assert_eq!(CellCoord::from_a1("A0"), None);
        assert_eq!(CellCoord::from_a1("1A"), None);
        assert_eq!(CellCoord::from_a1("A1B"), None);
    }

    #[test]
    fn test_coord_key() {
        assert_eq!(CellCoord::from_key("3,4"), Some(CellCoord::new(3, 4)));
        assert_eq!(CellCoord::from_key("C2"), Some(CellCoord::new(1, 2)));
        assert_eq!(CellCoord::from_key("x,1"), None);
        assert_eq!(CellCoord::new(7, 0).to_key(), "7,0");
    }
}
