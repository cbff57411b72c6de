#![no_main]

use htmlmath::tree::Kind;
use htmlmath::{Element, Fragment, FragmentToMathML, Node};
use libfuzzer_sys::fuzz_target;

const TAGS: [&str; 7] = ["span", "i", "b", "sup", "sub", "br", "style"];
const CLASSES: [&str; 6] = ["texhtml", "nowrap", "sfrac", "frac", "sfrac nowrap", "mathcal"];
const STYLES: [&str; 6] = [
    "display:none",
    "font-style:italic;",
    "position:relative; margin-right:-0.75em; right:0.75em; bottom:0.75em;;",
    "position:relative; margin-right:-0.75em; right:0.75em; top:0.45em;;",
    "display:inline-block;margin-bottom:-0.3em;vertical-align:-0.4em;line-height:1.2em;font-size:80%;text-align:left",
    "display:inline-block;margin-bottom:-0.3em;vertical-align:-0.4em;line-height:1.2em;font-size:85%;text-align:right",
];
const TEXTS: [&str; 12] = [
    "x", "2", "√", "∫", "⁄", "/", "(", ")", "[", "′", "a + b", "\u{a0}",
];

/// Reads a fragment tree off the input bytes.
struct Reader<'a> {
    data: &'a [u8],
}

impl Reader<'_> {
    fn next(&mut self) -> u8 {
        match self.data.split_first() {
            Some((&byte, rest)) => {
                self.data = rest;
                byte
            }
            None => 0,
        }
    }

    fn pick<'t>(&mut self, table: &[&'t str]) -> &'t str {
        table[self.next() as usize % table.len()]
    }

    fn fragment(&mut self, depth: usize) -> Fragment {
        let byte = self.next();
        if depth > 12 || byte % 3 == 0 {
            return Fragment::text(self.pick(&TEXTS));
        }
        let mut element = Element::new(self.pick(&TAGS));
        if byte & 0x10 != 0 {
            element = element.with_class(self.pick(&CLASSES));
        }
        if byte & 0x20 != 0 {
            element = element.with_style(self.pick(&STYLES));
        }
        let children = self.next() % 5;
        for _ in 0..children {
            if self.data.is_empty() {
                break;
            }
            element = element.with_child(self.fragment(depth + 1));
        }
        element.into()
    }
}

fn check_scripts(node: &Node) {
    let arity = match node.kind {
        Kind::Sub | Kind::Sup => Some(2),
        Kind::SubSup => Some(3),
        _ => None,
    };
    if let Some(arity) = arity {
        assert_eq!(node.children.len(), arity, "incomplete script:\n{node}");
    }
    if node.kind == Kind::Row {
        assert!(
            node.children.iter().all(|child| child.kind != Kind::Row),
            "row inside row:\n{node}"
        );
    }
    node.children.iter().for_each(check_scripts);
}

fuzz_target!(|data: &[u8]| {
    let fragment = Reader { data }.fragment(0);
    let converter = FragmentToMathML::default();
    if let Ok(tree) = converter.expression_tree(&fragment) {
        check_scripts(&tree);
        let mut again = tree.clone();
        htmlmath::normalize(&mut again);
        assert_eq!(again, tree, "normalizing twice changed the tree");
    }
    let _ = converter.convert(&fragment);
});
