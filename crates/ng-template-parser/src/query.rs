//! Read-only queries over a parsed template.
//!
//! Every traversal is pre-order and visits a tag before its children and its
//! children before its attributes. Results come back in that order.

use crate::ast::*;
use crate::names::short_name;
use source_map::Span;
use text_size::TextSize;

/// An interpolation found in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InterpolationInfo<'a> {
    /// The interpolation text, including `{{` and `}}`.
    pub text: &'a str,
    /// The node span for `{{ ... }}` nodes. For interpolations inside an
    /// attribute value, the span of the expression between the braces.
    pub span: Span,
}

impl TemplateAst {
    /// Returns the most specific node at `pos`.
    ///
    /// Descends from the root into the first child whose full end lies past
    /// `pos`, or the last child if none does. A tag is returned as soon as its
    /// own span ends past `pos`; if `pos` touches one of its attributes, that
    /// attribute is returned instead. Returns `None` for an empty template.
    pub fn node_at_position(&self, pos: TextSize) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }

        let mut current = NodeId::ROOT;
        loop {
            let node = &self[current];
            if !node.is_container() || node.span.end > pos {
                break;
            }

            // The last child is the fallback, so its full end is never needed.
            let (&last, rest) = match node.children().split_last() {
                Some(split) => split,
                None => break,
            };
            current = rest
                .iter()
                .copied()
                .find(|&child| self.full_end_pos(child) > pos)
                .unwrap_or(last);
        }

        if matches!(
            self[current].kind,
            NodeKind::StartTag(_) | NodeKind::SelfClosingTag(_)
        ) {
            if let Some(attribute) = self.attribute_at_position(current, pos) {
                return Some(attribute);
            }
        }

        Some(current)
    }

    /// The end of a node including everything nested in it.
    ///
    /// For a start tag or the root this is the full end of its last child, so a
    /// closed tag ends after its end tag. Every other node ends where its span
    /// does.
    pub fn full_end_pos(&self, id: NodeId) -> TextSize {
        let mut id = id;
        loop {
            let node = &self[id];
            match node.children().last() {
                Some(&last) if node.is_container() => id = last,
                _ => return node.span.end,
            }
        }
    }

    /// Returns the attribute of `tag` whose span touches `pos`, ends included.
    ///
    /// Adjacent attributes can both touch `pos`; the later one wins.
    pub fn attribute_at_position(&self, tag: NodeId, pos: TextSize) -> Option<NodeId> {
        self[tag]
            .attributes()
            .iter()
            .rev()
            .copied()
            .find(|&attribute| self[attribute].span.touches(pos))
    }

    /// All start, end and self-closing tags.
    pub fn all_tags(&self) -> Vec<NodeId> {
        self.collect(|node| node.is_tag())
    }

    /// All attributes. An attribute comes after the attributes of the tags
    /// nested inside its own tag.
    pub fn all_attributes(&self) -> Vec<NodeId> {
        self.collect(|node| matches!(node.kind, NodeKind::Attribute(_)))
    }

    /// All interpolations, including those written inside attribute values.
    ///
    /// Attribute values are scanned from the back: the last `}}` is paired
    /// with the last `{{`, the value is cut before that `{{`, and the scan
    /// repeats. Several interpolations in one value therefore come out last
    /// first, and unbalanced braces can pair the wrong delimiters.
    pub fn all_interpolations(&self) -> Vec<InterpolationInfo<'_>> {
        let mut results = Vec::new();
        self.walk(|id, node| match &node.kind {
            NodeKind::Interpolation => results.push(InterpolationInfo {
                text: self.text(id),
                span: node.span,
            }),
            NodeKind::Attribute(attribute) => {
                attribute_interpolations(attribute, &mut results);
            }
            _ => {}
        });
        results
    }

    /// Without an attribute name, all tags named `tag_name`.
    ///
    /// With one, the attributes of tags named `tag_name` that are spelled
    /// either bare or with a `data-` prefix. A `data-` prefix on the queried
    /// name is ignored.
    pub fn nodes_of(&self, tag_name: &str, attribute_name: Option<&str>) -> Vec<NodeId> {
        let attribute_name = attribute_name
            .filter(|name| !name.is_empty())
            .map(|name| name.strip_prefix("data-").unwrap_or(name));

        let Some(bare) = attribute_name else {
            return self.collect(|node| node.is_tag() && node.name() == Some(tag_name));
        };

        let prefixed = format!("data-{bare}");
        self.collect(|node| {
            let Some(attribute) = node.as_attribute() else {
                return false;
            };
            let owner = node.parent.and_then(|parent| self[parent].name());
            (attribute.name == bare || attribute.name == prefixed) && owner == Some(tag_name)
        })
    }

    /// Attributes named `short_names[0]` whose tag also carries every other
    /// name in `short_names`. Names are compared by [`short_name`].
    ///
    /// `attributes(&["ng-model", "ng-change"])` finds every `ng-model` written
    /// next to an `ng-change`.
    pub fn attributes(&self, short_names: &[&str]) -> Vec<NodeId> {
        let Some(&first) = short_names.first() else {
            return Vec::new();
        };

        self.collect(|node| {
            let (Some(attribute), Some(parent)) = (node.as_attribute(), node.parent) else {
                return false;
            };
            if short_name(&attribute.name) != first {
                return false;
            }
            let siblings = self.attribute_short_names(parent);
            short_names.iter().all(|name| siblings.contains(name))
        })
    }

    /// The short names of a tag's attributes, in source order.
    pub fn attribute_short_names(&self, tag: NodeId) -> Vec<&str> {
        self[tag]
            .attributes()
            .iter()
            .filter_map(|&id| self[id].as_attribute())
            .map(|attribute| short_name(&attribute.name))
            .collect()
    }

    /// Collects the ids of all nodes matching `pred`, in traversal order.
    fn collect(&self, pred: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.walk(|id, node| {
            if pred(node) {
                ids.push(id);
            }
        });
        ids
    }

    /// Visits every node in pre-order: node, children, then attributes.
    fn walk<'a>(&'a self, mut f: impl FnMut(NodeId, &'a Node)) {
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            f(id, node);
            // Attributes go below children so children pop first.
            stack.extend(node.attributes().iter().rev());
            stack.extend(node.children().iter().rev());
        }
    }
}

/// Extracts `{{ ... }}` runs from an attribute value, last one first.
fn attribute_interpolations<'a>(
    attribute: &'a Attribute,
    results: &mut Vec<InterpolationInfo<'a>>,
) {
    let (Some(value), Some(value_pos)) = (attribute.value.as_deref(), attribute.value_pos) else {
        return;
    };

    let mut rest = value;
    while let (Some(close), Some(open)) = (rest.rfind("}}"), rest.rfind("{{")) {
        // A `{{` after the last `}}` yields the text between them.
        let from = open.min(close + 2);
        let to = open.max(close + 2);

        let start = value_pos + TextSize::from((open + 2) as u32);
        let end = value_pos + TextSize::from(close as u32);
        results.push(InterpolationInfo {
            text: &value[from..to],
            span: Span::new(start.min(end), end),
        });

        rest = &rest[..open];
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, NodeKind};
    use pretty_assertions::assert_eq;
    use source_map::Span;
    use text_size::TextSize;

    fn texts(source: &str, ids: &[crate::NodeId]) -> Vec<String> {
        let result = parse(source);
        ids.iter().map(|&id| result.ast.text(id).to_string()).collect()
    }

    #[test]
    fn test_node_at_position_in_attribute_value() {
        let source = r#"<a href="x">t</a>"#;
        let result = parse(source);
        let id = result.ast.node_at_position(TextSize::from(9)).unwrap();
        assert_eq!(result.ast[id].name(), Some("href"));
        assert!(matches!(result.ast[id].kind, NodeKind::Attribute(_)));
    }

    #[test]
    fn test_node_at_position_in_text() {
        let result = parse(r#"<a href="x">t</a>"#);
        let id = result.ast.node_at_position(TextSize::from(12)).unwrap();
        assert_eq!(result.ast[id].kind, NodeKind::Text);
        assert_eq!(result.ast.text(id), "t");
    }

    #[test]
    fn test_node_at_position_on_tag_name() {
        let result = parse(r#"<div class="a"><span>x</span></div>"#);
        let id = result.ast.node_at_position(TextSize::from(2)).unwrap();
        assert_eq!(result.ast[id].name(), Some("div"));

        let id = result.ast.node_at_position(TextSize::from(17)).unwrap();
        assert_eq!(result.ast[id].name(), Some("span"));
        assert!(matches!(result.ast[id].kind, NodeKind::StartTag(_)));
    }

    #[test]
    fn test_node_at_position_in_end_tag() {
        let result = parse("<p><b>x</b></p>");
        let id = result.ast.node_at_position(TextSize::from(9)).unwrap();
        assert_eq!(result.ast.text(id), "</b>");
    }

    #[test]
    fn test_node_at_position_attribute_end_is_inclusive() {
        let result = parse("<input ng-model>");
        let id = result.ast.node_at_position(TextSize::from(15)).unwrap();
        assert_eq!(result.ast[id].name(), Some("ng-model"));
    }

    #[test]
    fn test_node_at_position_past_end_returns_last_node() {
        let result = parse("<p>a</p>  ");
        let id = result.ast.node_at_position(TextSize::from(100)).unwrap();
        assert_eq!(result.ast[id].kind, NodeKind::Text);
        assert_eq!(result.ast[id].span, Span::empty(TextSize::from(10)));
    }

    #[test]
    fn test_node_at_position_in_empty_template() {
        let result = parse("");
        assert_eq!(result.ast.node_at_position(TextSize::from(0)), None);
    }

    #[test]
    fn test_full_end_pos_is_recursive() {
        let result = parse("<a><b>x</b>");
        let a = result.ast.root().children()[0];
        // `<a>` is never closed, so its last child is the still-closed `<b>`.
        assert_eq!(result.ast.full_end_pos(a), TextSize::from(11));
        assert_eq!(result.ast.full_end_pos(crate::NodeId::ROOT), TextSize::from(11));
    }

    #[test]
    fn test_all_tags() {
        let source = "<div><br><span></span></div>";
        let result = parse(source);
        assert_eq!(
            texts(source, &result.ast.all_tags()),
            vec!["<div>", "<br>", "<span>", "</span>", "</div>"]
        );
    }

    #[test]
    fn test_all_attributes_visits_children_first() {
        let source = r#"<div a="1"><span b="2"></span></div>"#;
        let result = parse(source);
        let names: Vec<_> = result
            .ast
            .all_attributes()
            .iter()
            .map(|&id| result.ast[id].name().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_all_interpolations_in_text() {
        let result = parse("{{a}} and {{b}}");
        let found = result.ast.all_interpolations();
        let found: Vec<_> = found.iter().map(|i| (i.text, i.span)).collect();
        assert_eq!(
            found,
            vec![
                ("{{a}}", Span::from_offsets(0, 5)),
                ("{{b}}", Span::from_offsets(10, 15)),
            ]
        );
    }

    #[test]
    fn test_all_interpolations_in_attribute_value() {
        let source = r#"<img title="{{a}}-{{bc}}">"#;
        let result = parse(source);
        let found = result.ast.all_interpolations();
        let found: Vec<_> = found.iter().map(|i| (i.text, i.span.slice(source))).collect();
        assert_eq!(found, vec![("{{bc}}", "bc"), ("{{a}}", "a")]);
    }

    #[test]
    fn test_all_interpolations_with_stray_braces() {
        let source = r#"<img title="}}x{{">"#;
        let result = parse(source);
        let found = result.ast.all_interpolations();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "x");
        // The expression span collapses onto the `}}`.
        assert_eq!(found[0].span, Span::empty(TextSize::from(12)));
    }

    #[test]
    fn test_nodes_of_tag() {
        let source = "<my-panel></my-panel><my-panel/>";
        let result = parse(source);
        assert_eq!(
            texts(source, &result.ast.nodes_of("my-panel", None)),
            vec!["<my-panel>", "</my-panel>", "<my-panel/>"]
        );
    }

    #[test]
    fn test_nodes_of_attribute_matches_data_prefix() {
        let source = r#"<my-panel title="a" data-title="b"></my-panel><div title="c"></div>"#;
        let result = parse(source);
        let expected = vec![r#"title="a""#, r#"data-title="b""#];
        assert_eq!(
            texts(source, &result.ast.nodes_of("my-panel", Some("title"))),
            expected
        );
        assert_eq!(
            texts(source, &result.ast.nodes_of("my-panel", Some("data-title"))),
            expected
        );
    }

    #[test]
    fn test_nodes_of_empty_attribute_name_means_tags() {
        let result = parse("<p></p>");
        assert_eq!(result.ast.nodes_of("p", Some("")).len(), 2);
    }

    #[test]
    fn test_attributes_requires_companions() {
        let source = concat!(
            r#"<input ng-model="a" ng-change="b">"#,
            r#"<input data-ng-model="c">"#,
            r#"<input ng-change="d" ng-model="e">"#,
        );
        let result = parse(source);
        assert_eq!(
            texts(source, &result.ast.attributes(&["ng-model", "ng-change"])),
            vec![r#"ng-model="a""#, r#"ng-model="e""#]
        );
        assert_eq!(
            texts(source, &result.ast.attributes(&["ng-model"])),
            vec![r#"ng-model="a""#, r#"data-ng-model="c""#, r#"ng-model="e""#]
        );
        assert!(result.ast.attributes(&[]).is_empty());
    }

    #[test]
    fn test_deeply_nested_tags() {
        let source = "<div>".repeat(50_000);
        let result = parse(&source);
        assert_eq!(result.ast.all_tags().len(), 50_000);
        assert!(result.ast.all_attributes().is_empty());
        assert!(result.ast.all_interpolations().is_empty());
        assert_eq!(
            result.ast.full_end_pos(crate::NodeId::ROOT),
            TextSize::from(250_000)
        );

        let first = result.ast.node_at_position(TextSize::from(0)).unwrap();
        assert_eq!(result.ast.text(first), "<div>");
        assert_eq!(result.ast[first].parent, Some(crate::NodeId::ROOT));

        let last = result.ast.node_at_position(TextSize::from(250_000)).unwrap();
        assert_eq!(result.ast[last].span, Span::from_offsets(249_995, 250_000));
        assert!(result.ast[last].children().is_empty());
    }

    #[test]
    fn test_attribute_short_names() {
        let result = parse(r#"<div data-ng-if="x" class="y" d></div>"#);
        let div = result.ast.root().children()[0];
        assert_eq!(result.ast.attribute_short_names(div), vec!["ng-if", "class", ""]);
    }
}
