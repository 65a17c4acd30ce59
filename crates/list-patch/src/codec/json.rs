//! JSON codec for edits and patches.
//!
//! Converts [`Edit`] and [`Patch`] to/from `serde_json::Value`. Positions
//! encode as `[section, item]` pairs; edits encode as `"op"`-tagged objects.

use std::collections::BTreeSet;

use serde_json::{json, Value};
use thiserror::Error;

use crate::edit::Edit;
use crate::patch::Patch;
use crate::snapshot::Position;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("invalid edit: {0}")]
    InvalidEdit(String),
    #[error("invalid patch: {0}")]
    InvalidPatch(String),
}

// ── Position helpers ──────────────────────────────────────────────────────

fn encode_position(pos: Position) -> Value {
    json!([pos.section, pos.item])
}

fn decode_position(v: &Value) -> Result<Position, CodecError> {
    let arr = v
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| CodecError::InvalidPosition(format!("expected [section, item], got {v}")))?;
    let index = |slot: &Value| {
        slot.as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| CodecError::InvalidPosition(format!("non-integer index in {v}")))
    };
    Ok(Position::new(index(&arr[0])?, index(&arr[1])?))
}

fn encode_positions(set: &BTreeSet<Position>) -> Value {
    Value::Array(set.iter().map(|&p| encode_position(p)).collect())
}

fn decode_positions(v: &Value) -> Result<BTreeSet<Position>, CodecError> {
    let arr = v
        .as_array()
        .ok_or_else(|| CodecError::InvalidPatch(format!("expected position array, got {v}")))?;
    arr.iter().map(decode_position).collect()
}

// ── Edit codec ────────────────────────────────────────────────────────────

/// Serialize an [`Edit`] to its JSON object form.
pub fn edit_to_json(edit: &Edit) -> Value {
    match edit {
        Edit::Assign { pos, value } => json!({
            "op": "assign",
            "pos": encode_position(*pos),
            "value": value,
        }),
        Edit::Remove { pos } => json!({
            "op": "remove",
            "pos": encode_position(*pos),
        }),
    }
}

/// Decode an [`Edit`] from its JSON object form.
pub fn edit_from_json(v: &Value) -> Result<Edit, CodecError> {
    let map = v
        .as_object()
        .ok_or_else(|| CodecError::InvalidEdit("not an object".into()))?;
    let pos = decode_position(
        map.get("pos")
            .ok_or_else(|| CodecError::InvalidEdit("missing pos".into()))?,
    )?;
    match map.get("op").and_then(Value::as_str) {
        Some("assign") => {
            let value = map
                .get("value")
                .and_then(Value::as_str)
                .ok_or_else(|| CodecError::InvalidEdit("assign requires a string value".into()))?;
            Ok(Edit::Assign {
                pos,
                value: value.to_string(),
            })
        }
        Some("remove") => Ok(Edit::Remove { pos }),
        Some(other) => Err(CodecError::InvalidEdit(format!("unknown op: {other}"))),
        None => Err(CodecError::InvalidEdit("missing op".into())),
    }
}

// ── Patch codec ───────────────────────────────────────────────────────────

/// Serialize a [`Patch`] to its JSON object form.
pub fn patch_to_json(patch: &Patch) -> Value {
    json!({
        "delete": encode_positions(&patch.deletions),
        "insert": encode_positions(&patch.insertions),
        "reload": encode_positions(&patch.reloads),
    })
}

/// Decode a [`Patch`] from its JSON object form. Missing instruction arrays
/// decode as empty.
pub fn patch_from_json(v: &Value) -> Result<Patch, CodecError> {
    let map = v
        .as_object()
        .ok_or_else(|| CodecError::InvalidPatch("not an object".into()))?;
    let field = |key: &str| match map.get(key) {
        Some(v) => decode_positions(v),
        None => Ok(BTreeSet::new()),
    };
    Ok(Patch {
        deletions: field("delete")?,
        insertions: field("insert")?,
        reloads: field("reload")?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────
