//! Wire-contract tests against hand-written documents, the shape a host
//! would have persisted from an earlier builder.

use formbuilder_layout::{load, save, FieldId, LayoutError};
use serde_json::json;

fn legacy_document() -> serde_json::Value {
    json!({
        "formSettings": {
            "width": "100%",
            "labelPosition": "top",
            "widthMode": "fixed",
            "fixedWidth": "800px",
            "minWidth": "320px"
        },
        "layout": {
            "rows": [{"height": "100px"}, {"height": "100px"}],
            "columns": [{"width": "50%"}, {"width": "50%"}],
            "cells": [
                {"row": 0, "col": 0, "rowSpan": 1, "colSpan": 1, "fieldId": "field_17095012340001"},
                {"row": 0, "col": 1, "rowSpan": 1, "colSpan": 1, "fieldId": null},
                {"row": 1, "col": 0, "rowSpan": 1, "colSpan": 1, "fieldId": null},
                {"row": 1, "col": 1, "rowSpan": 1, "colSpan": 1, "fieldId": "field_17095012340002"}
            ]
        },
        "fields": {
            "field_17095012340001": {
                "type": "text",
                "label": "文本1",
                "properties": {
                    "fontSize": "14px",
                    "border": "1px solid #dcdfe6",
                    "backgroundColor": "#ffffff",
                    "color": "#606266",
                    "required": true
                }
            },
            "field_17095012340002": {
                "type": "mobile",
                "label": "手机号码1",
                "properties": {"required": false}
            }
        }
    })
}

#[test]
fn legacy_document_loads_and_round_trips() {
    let document = legacy_document();
    let layout = load(&document).unwrap();

    assert_eq!(layout.row_count(), 2);
    assert_eq!(layout.column_count(), 2);
    assert_eq!(layout.fields.len(), 2);
    assert!(layout.is_consistent());

    let first = FieldId::from("field_17095012340001");
    assert_eq!(layout.cell_of_field(&first).map(|c| (c.row, c.col)), Some((0, 0)));
    assert!(layout.fields[&first].is_required());

    assert_eq!(save(&layout).unwrap(), document);
}

#[test]
fn loaded_document_accepts_further_mutation() {
    let mut layout = load(&legacy_document()).unwrap();
    let removal = layout.delete_row(0).unwrap();
    assert_eq!(
        removal.removed_fields,
        vec![FieldId::from("field_17095012340001")]
    );
    assert_eq!(layout.fields.len(), 1);
    assert!(layout.is_consistent());
}

#[test]
fn structured_errors_name_each_problem() {
    let err = load(&json!({
        "formSettings": {},
        "layout": {"rows": [], "columns": "two", "cells": []},
        "fields": []
    }))
    .unwrap_err();

    let LayoutError::InvalidDocument { errors } = err else {
        panic!("expected InvalidDocument, got {err}");
    };
    assert_eq!(
        errors,
        vec![
            "layout.columns 必须是一个数组".to_string(),
            "缺少必要的 fields 属性或格式不正确".to_string(),
        ]
    );
}
