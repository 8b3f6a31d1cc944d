//! App UI blocks.
//!
//! Widget blocks stage the text that constructs their widget in the session's
//! widget buffer and return the text that adds it to the column. The `app`
//! block clears the buffer, renders its items, and emits the staged widgets
//! ahead of the column.

use super::{item_count, value_or};
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::names::NameCategory;
use crate::output::Order;
use crate::workspace::Block;

pub(super) fn app<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    session.widgets.clear();
    let count = item_count(block, "ADD");
    let mut elements = Vec::with_capacity(count);
    for i in 0..count {
        let element = value_or(session, block, &format!("ADD{}", i), Order::None, "")?;
        if !element.is_empty() {
            elements.push(element);
        }
    }
    let widgets: Vec<String> = session.widgets.drain(..).map(|(_, text)| text).collect();

    let mut lines = Vec::new();
    lines.extend(widgets);
    lines.push("//  Create a column".to_string());
    lines.push("let mut col = Column::new();".to_string());
    lines.push("//  Add the widgets to the column".to_string());
    lines.extend(elements);
    lines.push("//  Return the column containing the widgets".to_string());
    lines.push("col".to_string());
    Ok(Code::expression(lines.join("\n"), Order::UnaryPostfix))
}

/// Binding for the widget named in field `NAME`, kept clear of the column,
/// the label text and every other identifier in the file.
fn widget_name(session: &mut Session<'_>, block: &Block) -> Result<String> {
    let name = block.require_field("NAME")?;
    Ok(session.names.get_name(&name, NameCategory::Widget))
}

pub(super) fn label<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let indent = session.indent();
    let name = widget_name(session, block)?;
    let value = session.value_to_code(block, "name", Order::Atomic)?;
    let show = if value.is_empty() { "on_label_show".to_string() } else { value };

    session.widgets.insert(
        name.clone(),
        [
            "//  Create a line of text based on a counter value".to_string(),
            "let text = LocalizedString::new(\"hello-counter\")".to_string(),
            format!("{}.with_arg(\"count\", {});  //  Call {} to get label", indent, show, show),
            "//  Create a label widget to display the text".to_string(),
            format!("let {} = Label::new(text);", name),
        ]
        .join("\n"),
    );

    let code = [
        "//  Add the label widget to the column, centered with padding".to_string(),
        "col.add_child(".to_string(),
        format!("{}Align::centered(", indent),
        format!("{i}{i}Padding::new(5.0, {})", name, i = indent),
        format!("{}),", indent),
        format!("{}1.0", indent),
        ");".to_string(),
    ]
    .join("\n");
    Ok(Code::expression(code, Order::None))
}

pub(super) fn button<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let indent = session.indent();
    let name = widget_name(session, block)?;
    let value = session.value_to_code(block, "name", Order::Atomic)?;
    let press = if value.is_empty() { "on_button_press".to_string() } else { value };

    session.widgets.insert(
        name.clone(),
        [
            "//  Create a button widget labelled \"increment\" to increment the counter".to_string(),
            format!("//  Call {} when pressed", press),
            format!("let {} = Button::new(\"increment\", {});", name, press),
        ]
        .join("\n"),
    );

    let code = [
        "//  Add the button widget to the column, with padding".to_string(),
        "col.add_child(".to_string(),
        format!("{}Padding::new(5.0, {}),", indent, name),
        format!("{}1.0", indent),
        ");".to_string(),
    ]
    .join("\n");
    Ok(Code::expression(code, Order::None))
}
