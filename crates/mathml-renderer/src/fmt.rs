const INDENT: &str = "    ";

/// Starts a new line and indents it by `indent_num` levels.
///
/// An indent of zero means pretty-printing is off, so nothing is written.
pub fn new_line_and_indent(s: &mut String, indent_num: usize) {
    if indent_num > 0 {
        s.push('\n');
    }
    for _ in 0..indent_num {
        s.push_str(INDENT);
    }
}
