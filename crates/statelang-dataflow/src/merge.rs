//! Writing a value into a document at a [`Pointer`].
//!
//! The walk goes top-down from the root. Any null or missing node on the way
//! is replaced by an empty container whose kind is picked from the token that
//! will be looked up in it: an array for a digit token, an object otherwise.
//! Arrays that are too short are padded with nulls.

use serde_json::{Map, Value};
use statelang_path::{Pointer, node_type};

use crate::error::DataFlowError;

/// Arrays are never padded past this many elements.
const MAX_ARRAY_LEN: usize = 1 << 24;

/// Set `value` at `pointer` inside `root`, creating missing ancestors.
///
/// The root pointer replaces the whole document.
pub fn set_at_pointer(
  root: &mut Value,
  pointer: &Pointer,
  value: Value,
) -> Result<(), DataFlowError> {
  let Some((field, parents)) = pointer.tokens().split_last() else {
    *root = value;
    return Ok(());
  };

  let mut node = root;
  for (depth, token) in parents.iter().enumerate() {
    let next = parents.get(depth + 1).unwrap_or(field);
    vivify(node, next);
    node = slot(node, token, &parents[..depth])?;
  }

  vivify(node, field);
  *slot(node, field, parents)? = value;
  Ok(())
}

fn vivify(node: &mut Value, next: &str) {
  if node.is_null() {
    *node = match Pointer::index(next) {
      Some(_) => Value::Array(Vec::new()),
      None => Value::Object(Map::new()),
    };
  }
}

/// The child slot for `token` under `node`, created as null if absent.
fn slot<'a>(
  node: &'a mut Value,
  token: &str,
  location: &[String],
) -> Result<&'a mut Value, DataFlowError> {
  match node {
    Value::Object(map) => Ok(map.entry(token).or_insert(Value::Null)),
    Value::Array(items) => {
      let index = Pointer::index(token).ok_or_else(|| {
        DataFlowError::generic(format!(
          "`{}` can't be set for parent node `{}` because parent is an ARRAY and `{}` is not an index",
          token,
          Pointer::from_tokens(location),
          token
        ))
      })?;
      if items.len() <= index {
        grow(items, index, token)?;
      }
      Ok(&mut items[index])
    }
    other => Err(DataFlowError::generic(format!(
      "`{}` can't be set for parent node `{}` because parent is not a container but {}",
      token,
      Pointer::from_tokens(location),
      node_type(other)
    ))),
  }
}

/// Pad `items` with nulls so that `index` exists.
fn grow(items: &mut Vec<Value>, index: usize, token: &str) -> Result<(), DataFlowError> {
  if index >= MAX_ARRAY_LEN {
    return Err(DataFlowError::generic(format!(
      "array index `{}` is too large, the limit is {}",
      token,
      MAX_ARRAY_LEN - 1
    )));
  }

  let len = index + 1;
  items
    .try_reserve(len - items.len())
    .map_err(|e| DataFlowError::generic(format!("can't grow array to index `{}`: {}", token, e)))?;
  items.resize(len, Value::Null);
  Ok(())
}
