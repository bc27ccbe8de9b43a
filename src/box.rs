//! Border characters for table grids.
//!
//! Every style draws 1-cell borders, which is what the layout planner
//! assumes when it charges border overhead against the table width.

/// A horizontal rule of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Above the first row.
    Top,
    /// Between the header rows and the body.
    Header,
    /// In place of a separator row.
    Separator,
    /// Below the last row.
    Bottom,
}

/// Border characters of one style.
///
/// Rules are `[left, horizontal, crossing, right]`. The `cell` row holds the
/// verticals drawn beside cell content; its horizontal slot is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxChars {
    pub top: [char; 4],
    pub cell: [char; 4],
    pub head_row: [char; 4],
    pub mid: [char; 4],
    pub bottom: [char; 4],
}

impl BoxChars {
    #[must_use]
    pub const fn new(
        top: [char; 4],
        cell: [char; 4],
        head_row: [char; 4],
        mid: [char; 4],
        bottom: [char; 4],
    ) -> Self {
        Self {
            top,
            cell,
            head_row,
            mid,
            bottom,
        }
    }

    fn rule_chars(&self, rule: Rule) -> [char; 4] {
        match rule {
            Rule::Top => self.top,
            Rule::Header => self.head_row,
            Rule::Separator => self.mid,
            Rule::Bottom => self.bottom,
        }
    }

    /// Append a rule over columns of the given outer widths, padding
    /// included, followed by a newline.
    pub fn push_rule(&self, out: &mut String, outer_widths: &[usize], rule: Rule) {
        let [left, horizontal, crossing, right] = self.rule_chars(rule);
        out.push(left);
        for (i, &width) in outer_widths.iter().enumerate() {
            if i > 0 {
                out.push(crossing);
            }
            out.extend(std::iter::repeat_n(horizontal, width));
        }
        out.push(right);
        out.push('\n');
    }

    /// Vertical border left of the first cell.
    #[must_use]
    pub fn cell_left(&self) -> char {
        self.cell[0]
    }

    /// Vertical border between two cells.
    #[must_use]
    pub fn cell_divider(&self) -> char {
        self.cell[2]
    }

    /// Vertical border right of the last cell.
    #[must_use]
    pub fn cell_right(&self) -> char {
        self.cell[3]
    }
}

/// ASCII box (safe for all terminals).
pub const ASCII: BoxChars = BoxChars::new(
    ['+', '-', '+', '+'],
    ['|', ' ', '|', '|'],
    ['+', '-', '+', '+'],
    ['+', '-', '+', '+'],
    ['+', '-', '+', '+'],
);

/// Unicode square/single line box.
pub const SQUARE: BoxChars = BoxChars::new(
    ['\u{250C}', '\u{2500}', '\u{252C}', '\u{2510}'], // ┌─┬┐
    ['\u{2502}', ' ', '\u{2502}', '\u{2502}'], // │ ││
    ['\u{251C}', '\u{2500}', '\u{253C}', '\u{2524}'], // ├─┼┤
    ['\u{251C}', '\u{2500}', '\u{253C}', '\u{2524}'], // ├─┼┤
    ['\u{2514}', '\u{2500}', '\u{2534}', '\u{2518}'], // └─┴┘
);

/// Unicode rounded box.
pub const ROUNDED: BoxChars = BoxChars::new(
    ['\u{256D}', '\u{2500}', '\u{252C}', '\u{256E}'], // ╭─┬╮
    ['\u{2502}', ' ', '\u{2502}', '\u{2502}'], // │ ││
    ['\u{251C}', '\u{2500}', '\u{253C}', '\u{2524}'], // ├─┼┤
    ['\u{251C}', '\u{2500}', '\u{253C}', '\u{2524}'], // ├─┼┤
    ['\u{2570}', '\u{2500}', '\u{2534}', '\u{256F}'], // ╰─┴╯
);

/// Unicode double line box.
pub const DOUBLE: BoxChars = BoxChars::new(
    ['\u{2554}', '\u{2550}', '\u{2566}', '\u{2557}'], // ╔═╦╗
    ['\u{2551}', ' ', '\u{2551}', '\u{2551}'], // ║ ║║
    ['\u{2560}', '\u{2550}', '\u{256C}', '\u{2563}'], // ╠═╬╣
    ['\u{2560}', '\u{2550}', '\u{256C}', '\u{2563}'], // ╠═╬╣
    ['\u{255A}', '\u{2550}', '\u{2569}', '\u{255D}'], // ╚═╩╝
);

/// Heavy head with single body.
pub const HEAVY_HEAD: BoxChars = BoxChars::new(
    ['\u{250F}', '\u{2501}', '\u{2533}', '\u{2513}'], // ┏━┳┓
    ['\u{2502}', ' ', '\u{2502}', '\u{2502}'], // │ ││
    ['\u{2521}', '\u{2501}', '\u{2547}', '\u{2529}'], // ┡━╇┩
    ['\u{251C}', '\u{2500}', '\u{253C}', '\u{2524}'], // ├─┼┤
    ['\u{2514}', '\u{2500}', '\u{2534}', '\u{2518}'], // └─┴┘
);

/// Named border styles, in the order they are listed to users.
pub const BOX_STYLES: [(&str, &BoxChars); 5] = [
    ("ascii", &ASCII),
    ("square", &SQUARE),
    ("rounded", &ROUNDED),
    ("double", &DOUBLE),
    ("heavy_head", &HEAVY_HEAD),
];

/// Look up a border style by name, ignoring case.
#[must_use]
pub fn get_box(name: &str) -> Option<&'static BoxChars> {
    let name = name.trim().to_lowercase();
    BOX_STYLES
        .iter()
        .find(|(style, _)| *style == name)
        .map(|(_, chars)| *chars)
}
