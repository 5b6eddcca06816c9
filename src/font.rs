//! 5x5 block letters for the hero name.

pub const GLYPH_HEIGHT: usize = 5;
pub const GLYPH_WIDTH: usize = 5;

const FILL: char = '█';

/// Rows of a glyph, `#` for filled cells. Only A-Z, digits and space.
fn pattern(c: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ####", "#    ", "#    ", "#    ", " ####"],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#### ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#### ", "#    ", "#    "],
        'G' => [" ####", "#    ", "#  ##", "#   #", " ####"],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["#####", "  #  ", "  #  ", "  #  ", "#####"],
        'J' => ["#####", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],
        '0' => [" ### ", "#  ##", "# # #", "##  #", " ### "],
        '1' => ["  #  ", " ##  ", "  #  ", "  #  ", " ### "],
        '2' => [" ### ", "#   #", "  ## ", " #   ", "#####"],
        '3' => ["#### ", "    #", " ### ", "    #", "#### "],
        '4' => ["#   #", "#   #", "#####", "    #", "    #"],
        '5' => ["#####", "#    ", "#### ", "    #", "#### "],
        '6' => [" ### ", "#    ", "#### ", "#   #", " ### "],
        '7' => ["#####", "    #", "   # ", "  #  ", "  #  "],
        '8' => [" ### ", "#   #", " ### ", "#   #", " ### "],
        '9' => [" ### ", "#   #", " ####", "    #", " ### "],
        ' ' => ["     ", "     ", "     ", "     ", "     "],
        _ => return None,
    };
    Some(rows)
}

/// Block rendering of `c`, one string per row
pub fn glyph(c: char) -> Option<[String; GLYPH_HEIGHT]> {
    pattern(c).map(|rows| rows.map(|row| row.chars().map(|ch| if ch == '#' { FILL } else { ' ' }).collect()))
}

/// Whether every character of `text` has a block glyph
pub fn can_render(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| pattern(c).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_dimensions() {
        for c in ('A'..='Z').chain('0'..='9') {
            let rows = glyph(c).unwrap();
            assert!(rows.iter().all(|r| r.chars().count() == GLYPH_WIDTH), "{c}");
        }
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('o'), glyph('O'));
        assert_eq!(glyph('O').unwrap()[0], " ███ ");
    }

    #[test]
    fn test_can_render() {
        assert!(can_render("OMA"));
        assert!(!can_render("O.M.A"));
        assert!(!can_render(""));
    }
}
