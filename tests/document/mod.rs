use pretty_assertions::assert_eq;

use typeset::document::Breakable;
use typeset::document::Document;
use typeset::document::Separator;

use crate::build_document;
use crate::settings_at;

#[test]
fn test_cached_breakables() {
    assert_eq!(Breakable { separator: " ", width: 1, force: false, indent: true }, Breakable::SPACE);
    assert_eq!(Breakable { separator: "", width: 0, force: false, indent: true }, Breakable::EMPTY);
    assert_eq!(Breakable { separator: " ", width: 1, force: true, indent: true }, Breakable::FORCE);
    assert_eq!(Breakable { separator: " ", width: 1, force: true, indent: false }, Breakable::RETURN);
}

#[test]
fn test_can_break_probes_the_whole_subtree() {
    let breaking = build_document(|builder| {
        builder.group(|builder| {
            builder.text("a");
            builder.indent(|builder| builder.breakable_space());
        });
    });
    assert!(breaking.can_break());

    let solid = build_document(|builder| {
        builder.group(|builder| {
            builder.text("a");
            builder.if_break(|builder| builder.text(","));
        });
    });
    assert!(!solid.can_break());
}

#[test]
fn test_last_position_of_plain_text() {
    let document = build_document(|builder| builder.text("receiver.message("));

    assert_eq!(17, document.last_position());
}

#[test]
fn test_last_position_restarts_after_a_breakable() {
    let document = build_document(|builder| {
        builder.text("first");
        builder.breakable_space();
        builder.text("second");
    });

    assert_eq!(6, document.last_position());
}

#[test]
fn test_last_position_uses_the_last_line_of_multiline_text() {
    let document = build_document(|builder| builder.text("ab\ncde"));

    assert_eq!(3, document.last_position());
}

#[test]
fn test_last_position_walks_the_flat_branch_of_if_breaks() {
    let document = build_document(|builder| {
        builder.text("x");
        builder.if_break(|builder| builder.text("very long")).if_flat(|builder| builder.text("y"));
    });

    assert_eq!(2, document.last_position());
}

#[test]
fn test_remove_breaks_inlines_the_subtree() {
    let mut document = build_document(|builder| {
        builder.group(|builder| {
            builder.text("do_stuff");
            builder.breakable_force();
            builder.text("more");
            builder.breakable_space();
            builder.text("done");
        });
    });

    document.remove_breaks(";");
    assert!(!document.can_break());

    let output = typeset::format(document, settings_at(5));
    assert_eq!("do_stuff;more done", output);
    assert!(!output.contains('\n'));
}

#[test]
fn test_join_interleaves_the_separator() {
    let parts = Document::join(
        vec![Document::Text("a"), Document::Text("b"), Document::Text("c")],
        Separator::CommaBreakable,
    );

    assert_eq!(
        vec![
            Document::Text("a"),
            Document::Text(","),
            Document::Breakable(Breakable::SPACE),
            Document::Text("b"),
            Document::Text(","),
            Document::Breakable(Breakable::SPACE),
            Document::Text("c"),
        ],
        parts,
    );
}

#[test]
fn test_joined_documents_render_flat_when_they_fit() {
    let output = crate::format_at(80, |builder| {
        builder.group(|builder| {
            for part in Document::join(
                vec![Document::Text("a"), Document::Text("b"), Document::Text("c")],
                Separator::CommaBreakable,
            ) {
                builder.push(part);
            }
        });
    });

    assert_eq!("a, b, c", output);
}

#[test]
fn test_display_renders_a_debugging_dsl() {
    let document = build_document(|builder| {
        builder.group(|builder| {
            builder.text("fn");
            builder.breakable_space();
            builder.if_break(|builder| builder.text(","));
        });
    });

    assert_eq!(r#"group(group(["fn", breakable_space, if_break(",", [])]))"#, document.to_string());
}

#[test]
fn test_display_names_the_cached_breakables() {
    assert_eq!("breakable_empty", Document::Breakable(Breakable::EMPTY).to_string());
    assert_eq!("breakable_return", Document::Breakable(Breakable::RETURN).to_string());
    assert_eq!(
        r#"breakable(", ", 2, force: false, indent: true)"#,
        Document::Breakable(Breakable::new(", ")).to_string(),
    );
}
