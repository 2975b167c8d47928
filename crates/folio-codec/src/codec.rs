//! Encoding and decoding between [`Node`] and [`TransportNode`].

use folio_tree::{join, FolderNode, Node};
use folio_types::BlobRef;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{CodecError, CodecResult};
use crate::transport::{TransportKind, TransportNode};

/// Key under which some stored documents wrap the root node.
const WRAPPER_KEY: &str = "root";

/// Convert a node (and its subtree) into transport form.
///
/// Folders always carry a `children` map, possibly empty; files carry a
/// `blobRef` and never `children`.
pub fn encode(node: &Node) -> TransportNode {
    match node {
        Node::File(file) => TransportNode {
            name: file.name().to_string(),
            kind: TransportKind::File,
            blob_ref: Some(file.blob_ref().as_str().to_string()),
            children: None,
        },
        Node::Folder(folder) => {
            let children: IndexMap<String, TransportNode> = folder
                .children()
                .map(|child| (child.name().to_string(), encode(child)))
                .collect();
            TransportNode {
                name: folder.name().to_string(),
                kind: TransportKind::Folder,
                blob_ref: None,
                children: Some(children),
            }
        }
    }
}

/// Rebuild a node from transport form, checking every structural invariant.
pub fn decode(transport: TransportNode) -> CodecResult<Node> {
    let path = transport.name.clone();
    decode_at(transport, &path)
}

fn decode_at(transport: TransportNode, path: &str) -> CodecResult<Node> {
    let TransportNode {
        name,
        kind,
        blob_ref,
        children,
    } = transport;

    match kind {
        TransportKind::File => {
            if children.is_some() {
                return Err(CodecError::malformed(path, "file node carries children"));
            }
            let blob_ref = blob_ref
                .ok_or_else(|| CodecError::malformed(path, "file node without blobRef"))?;
            let blob_ref =
                BlobRef::new(blob_ref).map_err(|e| CodecError::malformed(path, e.to_string()))?;
            Node::file(name, blob_ref).map_err(|e| CodecError::malformed(path, e.to_string()))
        }
        TransportKind::Folder => {
            if blob_ref.is_some() {
                return Err(CodecError::malformed(path, "folder node carries blobRef"));
            }
            let mut folder =
                FolderNode::new(name).map_err(|e| CodecError::malformed(path, e.to_string()))?;
            for (key, child) in children.unwrap_or_default() {
                let child_path = join(path, &key);
                if key != child.name {
                    return Err(CodecError::malformed(
                        &child_path,
                        format!("children key {key:?} does not match node name {:?}", child.name),
                    ));
                }
                let child = decode_at(child, &child_path)?;
                folder
                    .add_child(child)
                    .map_err(|e| CodecError::malformed(&child_path, e.to_string()))?;
            }
            Ok(Node::Folder(folder))
        }
    }
}

/// Encode into a `serde_json::Value` for schemaless document stores.
pub fn to_value(node: &Node) -> CodecResult<Value> {
    Ok(serde_json::to_value(encode(node))?)
}

/// Decode from a `serde_json::Value`.
///
/// Accepts either a bare node or a document of the form `{ "root": node }`.
pub fn from_value(value: Value) -> CodecResult<Node> {
    let transport: TransportNode = serde_json::from_value(unwrap_root(value))?;
    decode(transport)
}

/// Encode as compact JSON text.
pub fn to_json(node: &Node) -> CodecResult<String> {
    Ok(serde_json::to_string(&encode(node))?)
}

/// Encode as indented JSON text.
pub fn to_json_pretty(node: &Node) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(&encode(node))?)
}

/// Decode from JSON text; wrapped documents are accepted as in [`from_value`].
pub fn from_json(text: &str) -> CodecResult<Node> {
    let value: Value = serde_json::from_str(text)?;
    from_value(value)
}

fn unwrap_root(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(WRAPPER_KEY) => {
            map.remove(WRAPPER_KEY).unwrap_or(Value::Null)
        }
        other => other,
    }
}
