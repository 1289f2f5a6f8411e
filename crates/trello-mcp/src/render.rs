//! Rendering of tool results.
//!
//! The client hands back plain JSON; how it reaches the agent is decided
//! here. `Json` passes the value through as pretty-printed text, `Text`
//! writes a short human-readable summary per result kind.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// What a tool returned, so text rendering knows which fields to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    ServerInfo,
    Board,
    Boards,
    ActiveBoard,
    ActiveWorkspace,
    Workspaces,
    List,
    Lists,
    Card,
    Cards,
    Attachment,
    Activity,
}

pub fn render(format: OutputFormat, kind: ResultKind, value: &Value) -> String {
    match format {
        OutputFormat::Json => pretty(value),
        OutputFormat::Text => render_text(kind, value),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn render_text(kind: ResultKind, value: &Value) -> String {
    // Non-JSON upstream bodies arrive as {"text": ...}
    if let Some(text) = raw_text(value) {
        return text.to_string();
    }

    let rendered = match kind {
        ResultKind::ServerInfo => server_info(value),
        ResultKind::Board => board(value),
        ResultKind::Boards => many(value, "boards", board_line),
        ResultKind::ActiveBoard => value.get("active_board").map(|b| {
            format!(
                "Active board set to {} ({})\n{}",
                str_field(b, "name"),
                str_field(b, "id"),
                url_line(b)
            )
            .trim_end()
            .to_string()
        }),
        ResultKind::ActiveWorkspace => value
            .get("active_workspace_id")
            .and_then(Value::as_str)
            .map(|id| format!("Active workspace set to {}", id)),
        ResultKind::Workspaces => many(value, "workspaces", workspace_line),
        ResultKind::List => value.is_object().then(|| {
            format!("List: {}{}", list_line(value), archived_suffix(value))
        }),
        ResultKind::Lists => many(value, "lists", |l| {
            format!("{}{}", list_line(l), archived_suffix(l))
        }),
        ResultKind::Card => card(value),
        ResultKind::Cards => many(value, "cards", card_line),
        ResultKind::Attachment => value.is_object().then(|| {
            format!(
                "Attachment: {} ({})\n{}",
                str_field(value, "name"),
                str_field(value, "id"),
                url_line(value)
            )
            .trim_end()
            .to_string()
        }),
        ResultKind::Activity => many(value, "actions", activity_line),
    };

    rendered.unwrap_or_else(|| pretty(value))
}

fn raw_text(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    if obj.len() == 1 {
        obj.get("text").and_then(Value::as_str)
    } else {
        None
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("?")
}

fn url_line(value: &Value) -> String {
    value
        .get("url")
        .and_then(Value::as_str)
        .map(|u| format!("URL: {}", u))
        .unwrap_or_default()
}

fn archived_suffix(value: &Value) -> &'static str {
    if value.get("closed").and_then(Value::as_bool) == Some(true) {
        " [archived]"
    } else {
        ""
    }
}

fn many(value: &Value, noun: &str, line: impl Fn(&Value) -> String) -> Option<String> {
    let items = value.as_array()?;
    if items.is_empty() {
        return Some(format!("No {} found.", noun));
    }
    let mut out = format!("Found {} {}:", items.len(), noun);
    for item in items {
        out.push_str("\n- ");
        out.push_str(&line(item));
    }
    Some(out)
}

fn server_info(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    let lines: Vec<String> = obj
        .iter()
        .map(|(k, v)| {
            let shown = match v {
                Value::Null => "(none)".to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}: {}", k, shown)
        })
        .collect();
    Some(lines.join("\n"))
}

fn board(value: &Value) -> Option<String> {
    value.is_object().then(|| {
        format!(
            "Board: {} ({})\n{}",
            str_field(value, "name"),
            str_field(value, "id"),
            url_line(value)
        )
        .trim_end()
        .to_string()
    })
}

fn board_line(value: &Value) -> String {
    match value.get("url").and_then(Value::as_str) {
        Some(url) => format!(
            "{} ({}) {}",
            str_field(value, "name"),
            str_field(value, "id"),
            url
        ),
        None => format!("{} ({})", str_field(value, "name"), str_field(value, "id")),
    }
}

fn workspace_line(value: &Value) -> String {
    let name = value
        .get("displayName")
        .and_then(Value::as_str)
        .unwrap_or_else(|| str_field(value, "name"));
    format!("{} ({})", name, str_field(value, "id"))
}

fn list_line(value: &Value) -> String {
    format!("{} ({})", str_field(value, "name"), str_field(value, "id"))
}

fn card_line(value: &Value) -> String {
    let mut line = format!("{} ({})", str_field(value, "name"), str_field(value, "id"));
    if let Some(due) = value.get("due").and_then(Value::as_str) {
        line.push_str(&format!(" due {}", due));
    }
    line.push_str(archived_suffix(value));
    line
}

fn card(value: &Value) -> Option<String> {
    value.as_object()?;
    let mut lines = vec![format!(
        "Card: {} ({}){}",
        str_field(value, "name"),
        str_field(value, "id"),
        archived_suffix(value)
    )];
    if let Some(list) = value.get("idList").and_then(Value::as_str) {
        lines.push(format!("List: {}", list));
    }
    if let Some(due) = value.get("due").and_then(Value::as_str) {
        lines.push(format!("Due: {}", due));
    }
    if let Some(desc) = value
        .get("desc")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
    {
        lines.push(format!("Description: {}", desc));
    }
    let url = url_line(value);
    if !url.is_empty() {
        lines.push(url);
    }
    Some(lines.join("\n"))
}

fn activity_line(value: &Value) -> String {
    let who = value
        .pointer("/memberCreator/fullName")
        .and_then(Value::as_str)
        .unwrap_or("someone");
    let date = value.get("date").and_then(Value::as_str).unwrap_or("?");
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("action");
    match value.pointer("/data/card/name").and_then(Value::as_str) {
        Some(card) => format!("{} {} by {} on \"{}\"", date, kind, who, card),
        None => format!("{} {} by {}", date, kind, who),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_format_is_pretty_passthrough() {
        let value = json!({ "id": "b1", "name": "Roadmap" });
        let out = render(OutputFormat::Json, ResultKind::Board, &value);
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, value);
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_text_boards() {
        let value = json!([
            { "id": "b1", "name": "Roadmap", "url": "https://trello.com/b/b1" },
            { "id": "b2", "name": "Ops" }
        ]);
        let out = render(OutputFormat::Text, ResultKind::Boards, &value);
        assert_eq!(
            out,
            "Found 2 boards:\n- Roadmap (b1) https://trello.com/b/b1\n- Ops (b2)"
        );
    }

    #[test]
    fn test_text_empty_list() {
        let out = render(OutputFormat::Text, ResultKind::Cards, &json!([]));
        assert_eq!(out, "No cards found.");
    }

    #[test]
    fn test_text_lists_mark_archived() {
        let value = json!([
            { "id": "l1", "name": "Todo", "closed": false },
            { "id": "l2", "name": "Old", "closed": true }
        ]);
        let out = render(OutputFormat::Text, ResultKind::Lists, &value);
        assert!(out.contains("- Todo (l1)\n"));
        assert!(out.ends_with("- Old (l2) [archived]"));
    }

    #[test]
    fn test_text_card_details() {
        let value = json!({
            "id": "c1",
            "name": "Fix login",
            "idList": "l1",
            "due": "2025-02-01T00:00:00.000Z",
            "desc": "",
            "url": "https://trello.com/c/c1"
        });
        let out = render(OutputFormat::Text, ResultKind::Card, &value);
        assert_eq!(
            out,
            "Card: Fix login (c1)\nList: l1\nDue: 2025-02-01T00:00:00.000Z\nURL: https://trello.com/c/c1"
        );
    }

    #[test]
    fn test_text_active_selection() {
        let board = json!({ "active_board": { "id": "b1", "name": "Roadmap" } });
        assert_eq!(
            render(OutputFormat::Text, ResultKind::ActiveBoard, &board),
            "Active board set to Roadmap (b1)"
        );

        let workspace = json!({ "active_workspace_id": "ws1" });
        assert_eq!(
            render(OutputFormat::Text, ResultKind::ActiveWorkspace, &workspace),
            "Active workspace set to ws1"
        );
    }

    #[test]
    fn test_text_activity() {
        let value = json!([{
            "type": "updateCard",
            "date": "2025-01-02T03:04:05.000Z",
            "memberCreator": { "fullName": "Sam Doe" },
            "data": { "card": { "name": "Fix login" } }
        }]);
        let out = render(OutputFormat::Text, ResultKind::Activity, &value);
        assert_eq!(
            out,
            "Found 1 actions:\n- 2025-01-02T03:04:05.000Z updateCard by Sam Doe on \"Fix login\""
        );
    }

    #[test]
    fn test_text_passes_raw_body_through() {
        let out = render(OutputFormat::Text, ResultKind::Card, &json!({ "text": "OK" }));
        assert_eq!(out, "OK");
    }

    #[test]
    fn test_text_falls_back_to_json_for_unexpected_shape() {
        let value = json!({ "unexpected": true });
        let out = render(OutputFormat::Text, ResultKind::Boards, &value);
        assert_eq!(out, serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn test_text_server_info_shows_missing_selection() {
        let value = json!({ "server_name": "Trello MCP Server", "active_board_id": null });
        let out = render(OutputFormat::Text, ResultKind::ServerInfo, &value);
        assert!(out.contains("active_board_id: (none)"));
        assert!(out.contains("server_name: Trello MCP Server"));
    }
}
