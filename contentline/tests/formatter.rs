// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the content line formatter

use aimcal_contentline::{Component, FoldingStyle, FormatOptions, Formatter, Property, format};

#[test]
fn formatter_component_with_parameters() {
    let component = Component::new("c")
        .with_property(Property::new("TYPE", "Transporter").with_parameter("CLASS", ">6m"))
        .with_property(
            Property::new("feature", "Content:'!,;.'")
                .with_parameter("par1", "e^'n")
                .with_parameter("PAR1", "other,val")
                .with_parameter("PAR2", "x\ny"),
        );

    let text = format(&component).unwrap();
    assert_eq!(
        text,
        "BEGIN:C\r\n\
TYPE;CLASS=>6m:Transporter\r\n\
FEATURE;PAR1=e^^'n,\"other,val\";PAR2=x^ny:Content:'!,;.'\r\n\
END:C\r\n"
    );
}

#[test]
fn formatter_quotes_reserved_characters() {
    let component = Component::new("C")
        .with_property(Property::new("FEATURE", "Lorem").with_parameter("LANG", "e;n"));
    assert_eq!(
        format(&component).unwrap(),
        "BEGIN:C\r\nFEATURE;LANG=\"e;n\":Lorem\r\nEND:C\r\n"
    );
}

#[test]
fn formatter_folds_long_value() {
    let value = "a".repeat(100);
    let component = Component::new("A").with_property(Property::new("X", value.clone()));
    let text = format(&component).unwrap();

    let lines: Vec<_> = text.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], format!("X:{}", "a".repeat(73)));
    assert_eq!(lines[2], format!(" {}", "a".repeat(27)));
    assert!(lines.iter().all(|line| line.len() <= 75));

    let unfolded = text.replace("\r\n ", "");
    assert!(unfolded.contains(&format!("X:{value}\r\n")));
}

#[test]
fn formatter_folds_multibyte_text() {
    let value = "日本語のテキスト".repeat(8);
    let component = Component::new("A").with_property(Property::new("SUMMARY", value.clone()));
    let text = format(&component).unwrap();

    for line in text.split_terminator("\r\n") {
        assert!(line.len() <= 75, "{line:?} is {} octets", line.len());
    }
    assert!(text.replace("\r\n ", "").contains(&value));
}

#[test]
fn formatter_custom_options() {
    let component = Component::new("A").with_property(Property::new("X", "abcdefgh"));

    let options = FormatOptions::default()
        .folding(Some(6))
        .folding_style(FoldingStyle::Tab);
    assert_eq!(
        options.write_to_string(&component).unwrap(),
        "BEGIN:\r\n\tA\r\nX:abcd\r\n\tefgh\r\nEND:A\r\n"
    );

    let options = FormatOptions::default().folding(None);
    let long = Component::new("A").with_property(Property::new("X", "b".repeat(120)));
    let text = options.write_to_string(&long).unwrap();
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn formatter_writes_into_writer() {
    let component = Component::new("vcard").with_property(Property::new("fn", "Jane"));

    let mut buffer = Vec::new();
    let mut formatter = Formatter::new(&mut buffer, FormatOptions::default());
    formatter.write_component(&component).unwrap();
    formatter.write_component(&component).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.matches("BEGIN:VCARD\r\nFN:Jane\r\nEND:VCARD\r\n").count(), 2);
}
