use mathml_renderer::arena::Arena;
use mathml_renderer::ast::Node as MathNode;

use crate::character_class::Class;
use crate::error::{ConvertErrKind, ConvertError};
use crate::tree::{Kind, Node, Payload};

/// Lower a normalized expression tree into the MathML AST.
///
/// Fails if a node has a number of children its MathML element cannot take.
pub(crate) fn lower<'arena>(
    arena: &'arena Arena,
    node: &Node,
) -> Result<&'arena MathNode<'arena>, ConvertError> {
    let lowered = match node.kind {
        Kind::Text => {
            let text = arena.alloc_str(node.as_text().unwrap_or_default());
            match Class::of(text) {
                Class::Identifier => MathNode::Identifier(text),
                Class::Number => MathNode::Number(text),
                Class::Operator => MathNode::Operator(text),
            }
        }
        Kind::Row => MathNode::Row(lower_all(arena, &node.children)?),
        Kind::Sqrt => {
            let [radicand] = children_of(node)?;
            MathNode::Sqrt(lower(arena, radicand)?)
        }
        Kind::Radic => {
            let [radicand, degree] = children_of(node)?;
            MathNode::Root(lower(arena, degree)?, lower(arena, radicand)?)
        }
        Kind::Frac => {
            let [num, denom] = children_of(node)?;
            MathNode::Frac {
                num: lower(arena, num)?,
                denom: lower(arena, denom)?,
            }
        }
        Kind::Integral => {
            let [lower_limit, upper_limit] = children_of(node)?;
            let glyph = match node.payload {
                Payload::Glyph(glyph) => glyph,
                _ => '∫',
            };
            let sign: &MathNode = arena.push(MathNode::Operator(arena.alloc_char(glyph)));
            MathNode::SubSup {
                target: sign,
                sub: lower(arena, lower_limit)?,
                sup: lower(arena, upper_limit)?,
            }
        }
        Kind::Sub | Kind::Sup => {
            let [base, script] = children_of(node)?;
            let target = lower(arena, base)?;
            let symbol = lower(arena, script)?;
            match (node.kind, node.is_stacked()) {
                (Kind::Sub, true) => MathNode::Underset { symbol, target },
                (Kind::Sub, false) => MathNode::Subscript { target, symbol },
                (_, true) => MathNode::Overset { symbol, target },
                (_, false) => MathNode::Superscript { target, symbol },
            }
        }
        Kind::SubSup => {
            let [base, sub, sup] = children_of(node)?;
            MathNode::SubSup {
                target: lower(arena, base)?,
                sub: lower(arena, sub)?,
                sup: lower(arena, sup)?,
            }
        }
        Kind::Fence => {
            let (open, close) = match node.payload {
                Payload::Delimiters(open, close) => (open, close),
                _ => ('(', ')'),
            };
            let content: &MathNode = match node.children.as_slice() {
                [only] => lower(arena, only)?,
                children => arena.push(MathNode::Row(lower_all(arena, children)?)),
            };
            MathNode::Fenced {
                open,
                close,
                content,
            }
        }
    };
    let lowered: &MathNode = arena.push(lowered);
    Ok(lowered)
}

fn lower_all<'arena>(
    arena: &'arena Arena,
    nodes: &[Node],
) -> Result<&'arena [&'arena MathNode<'arena>], ConvertError> {
    let lowered = nodes
        .iter()
        .map(|node| lower(arena, node))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(arena.push_slice(&lowered))
}

/// The children of `node`, which must be exactly `N`.
fn children_of<const N: usize>(node: &Node) -> Result<&[Node; N], ConvertError> {
    <&[Node; N]>::try_from(node.children.as_slice()).map_err(|_| {
        ConvertError(ConvertErrKind::Arity {
            kind: node.kind,
            expected: N,
            got: node.children.len(),
        })
    })
}

#[cfg(test)]
mod tests {
    use mathml_renderer::ast::MathMLEmitter;

    use super::*;

    fn render(node: &Node) -> Result<String, ConvertError> {
        let arena = Arena::new();
        let ast = lower(&arena, node)?;
        let mut emitter = MathMLEmitter::new();
        emitter.emit(ast, 0).unwrap();
        Ok(emitter.into_inner())
    }

    #[test]
    fn text_classes() {
        assert_eq!(render(&Node::text("42")).unwrap(), "<mn>42</mn>");
        assert_eq!(render(&Node::text("x")).unwrap(), "<mi>x</mi>");
        assert_eq!(render(&Node::text("+")).unwrap(), "<mo>+</mo>");
        assert_eq!(render(&Node::text(".")).unwrap(), "<mo>.</mo>");
        assert_eq!(render(&Node::text("&")).unwrap(), "<mo>&amp;</mo>");
    }

    #[test]
    fn square_root() {
        let node = Node::new(Kind::Sqrt, vec![Node::text("2")]);
        assert_eq!(render(&node).unwrap(), "<msqrt><mn>2</mn></msqrt>");
    }

    #[test]
    fn root_degree_comes_last() {
        let node = Node::new(Kind::Radic, vec![Node::text("x"), Node::text("3")]);
        assert_eq!(
            render(&node).unwrap(),
            "<mroot><mi>x</mi><mn>3</mn></mroot>"
        );
    }

    #[test]
    fn integral() {
        let node = Node::with_payload(
            Kind::Integral,
            Payload::Glyph('∮'),
            vec![Node::text("C"), Node::empty_row()],
        );
        assert_eq!(
            render(&node).unwrap(),
            "<msubsup><mo>∮</mo><mi>C</mi><mrow></mrow></msubsup>"
        );
    }

    #[test]
    fn stacked_scripts() {
        let over = Node::with_payload(
            Kind::Sup,
            Payload::Stacked,
            vec![Node::text("x"), Node::text("¯")],
        );
        assert_eq!(
            render(&over).unwrap(),
            "<mover><mi>x</mi><mo>¯</mo></mover>"
        );
        let under = Node::with_payload(
            Kind::Sub,
            Payload::Stacked,
            vec![Node::text("x"), Node::text("_")],
        );
        assert_eq!(
            render(&under).unwrap(),
            "<munder><mi>x</mi><mo>_</mo></munder>"
        );
        let sub = Node::new(Kind::Sub, vec![Node::text("a"), Node::text("1")]);
        assert_eq!(render(&sub).unwrap(), "<msub><mi>a</mi><mn>1</mn></msub>");
    }

    #[test]
    fn fence_with_one_child_is_not_wrapped() {
        let node = Node::fence('[', ']', vec![Node::text("a")]);
        assert_eq!(
            render(&node).unwrap(),
            "<mrow><mo>[</mo><mi>a</mi><mo>]</mo></mrow>"
        );
    }

    #[test]
    fn fence_with_several_children_gets_inner_row() {
        let node = Node::fence('(', ')', vec![Node::text("a"), Node::text("b")]);
        assert_eq!(
            render(&node).unwrap(),
            "<mrow><mo>(</mo><mrow><mi>a</mi><mi>b</mi></mrow><mo>)</mo></mrow>"
        );
        let empty = Node::fence('{', '}', vec![]);
        assert_eq!(
            render(&empty).unwrap(),
            "<mrow><mo>{</mo><mrow></mrow><mo>}</mo></mrow>"
        );
    }

    #[test]
    fn wrong_child_count_is_an_error() {
        let node = Node::new(
            Kind::Frac,
            vec![Node::text("1"), Node::text("2"), Node::text("3")],
        );
        assert_eq!(
            render(&node).unwrap_err().to_string(),
            "Expected 2 children in \"frac\" node, but found 3."
        );
        let script = Node::new(Kind::SubSup, vec![Node::text("x")]);
        assert_eq!(
            render(&script).unwrap_err().to_string(),
            "Expected 3 children in \"su\" node, but found 1."
        );
    }
}
