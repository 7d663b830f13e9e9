use crate::{
    domain::Board,
    error::{KanbanError, Result},
};
use serde_json::Value;

/// Serializes the board as indented, human-readable JSON:
///
/// ```text
/// { "columns": [ { "id", "title", "cards": [ { "id", "title", "desc", "tag" } ] } ] }
/// ```
pub fn export(board: &Board) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(board)?)
}

/// Parses a snapshot.
///
/// Only the shape is checked: the top level must carry a `columns` list.
/// Field contents are decoded leniently; callers should `normalize` the result.
pub fn decode(bytes: &[u8]) -> Result<Board> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| KanbanError::import(e.to_string()))?;

    if !value.get("columns").map_or(false, Value::is_array) {
        return Err(KanbanError::import("Invalid format"));
    }

    serde_json::from_value(value).map_err(|e| KanbanError::import(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, CardId, Column, ColumnId};

    fn board() -> Board {
        Board::new(vec![
            Column::new(ColumnId::from("col_1"), "Todo")
                .with_card(
                    Card::new(CardId::from("c_1"), "First")
                        .with_description("line one\nline two")
                        .with_tag("ops"),
                )
                .with_card(Card::new(CardId::from("c_2"), "Second")),
            Column::new(ColumnId::from("col_2"), "Done"),
        ])
    }

    #[test]
    fn test_export_is_pretty_json() {
        let bytes = export(&board()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains('\n'));
        assert!(text.contains("  \"columns\": ["));
        assert!(text.contains("\"desc\": \"line one\\nline two\""));
    }

    #[test]
    fn test_import_of_export_is_structurally_equal() {
        let original = board();
        let decoded = decode(&export(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_missing_columns_is_invalid_format() {
        let err = decode(br#"{"foo": 1}"#).unwrap_err();
        assert!(matches!(err, KanbanError::ImportFailed(_)));
        assert_eq!(err.to_string(), "Import failed: Invalid format");
    }

    #[test]
    fn test_columns_must_be_a_list() {
        let err = decode(br#"{"columns": {"id": "col_1"}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Import failed: Invalid format");

        let err = decode(br#"[{"columns": []}]"#).unwrap_err();
        assert_eq!(err.to_string(), "Import failed: Invalid format");
    }

    #[test]
    fn test_malformed_text() {
        let err = decode(b"{ not json").unwrap_err();
        assert!(err.to_string().starts_with("Import failed: "));
    }

    #[test]
    fn test_non_object_column_fails() {
        let err = decode(br#"{"columns": ["Todo"]}"#).unwrap_err();
        assert!(matches!(err, KanbanError::ImportFailed(_)));
    }

    #[test]
    fn test_missing_optional_fields_read_as_empty() {
        let board = decode(
            br#"{"columns": [{"id": "col_1", "title": "Todo", "cards": [{"id": "c_1", "title": "Bare"}]}]}"#,
        )
        .unwrap();

        let card = &board.columns[0].cards[0];
        assert_eq!(card.description, "");
        assert_eq!(card.tag, "");
    }

    #[test]
    fn test_empty_board_is_valid() {
        let board = decode(br#"{"columns": []}"#).unwrap();
        assert!(board.is_empty());
    }
}
