//! Response normalization: turn a response tree into a [`Table`].
//!
//! Each request kind has a small set of accepted shapes. Anything else is a
//! shape error, which is reported as the service's own message when the
//! response carries one and as [`QaawsError::MalformedResponse`] otherwise.
//! A single child and a repeated child are read the same way through
//! [`Node::as_seq`].

use std::fmt;

use qaaws_model::node::NodeKind;
use qaaws_model::{Node, Record, RequestKind, RequestTarget, Table};
use tracing::{debug, warn};

use crate::error::{QaawsError, Result};

/// Field name of a list-of-values entry given as a bare value.
pub const VALUE_INDEX_FIELD: &str = "valueindex";

/// Prefix of a message reported in place of a default query table.
pub const SERVICE_ERROR_PREFIX: &str = "Qaaws Error: ";

/// Convert the response to `target` into a table.
pub fn normalize(tree: &Node, target: &RequestTarget) -> Result<Table> {
    let outcome = locate_response(tree, &target.response_element)
        .map_err(Failure::from)
        .and_then(|response| match target.kind {
            RequestKind::ListOfValues => list_of_values(&response),
            RequestKind::CustomAction => custom_action(&response),
            RequestKind::DefaultQuery => default_query(&response),
        });

    match outcome {
        Ok(records) => {
            debug!(kind = %target.kind, records = records.len(), "normalized response");
            Ok(Table::new(records))
        }
        Err(Failure::Service(message)) => Err(QaawsError::ServiceReported(message)),
        Err(Failure::Shape(shape)) => {
            warn!(kind = %target.kind, "unexpected response shape: {shape}");
            match service_message(tree, &target.response_element) {
                Some(message) => Err(QaawsError::ServiceReported(message.to_string())),
                None => Err(QaawsError::MalformedResponse(format!(
                    "unable to normalize response: {shape}"
                ))),
            }
        }
    }
}

fn locate_response<'a>(tree: &'a Node, element: &str) -> Shaped<Located<'a>> {
    Located::root(tree)
        .field("envelope")?
        .field("body")?
        .field(element)
}

fn service_message<'a>(tree: &'a Node, element: &str) -> Option<&'a str> {
    tree.path(&["envelope", "body", element, "message"])
        .and_then(Node::as_text)
}

/// `lov.valueindex`: one record per entry.
fn list_of_values(response: &Located<'_>) -> Branch {
    let lov = response.field("lov")?;
    if lov.node.is_empty_map() {
        return Ok(Vec::new());
    }
    let entries = lov.field(VALUE_INDEX_FIELD)?;
    let records = entries
        .items()
        .iter()
        .map(|entry| match entry.node {
            Node::Text(value) => {
                Ok(Record::new().with(VALUE_INDEX_FIELD, Some(value.as_str())))
            }
            Node::Map(fields) if fields.is_empty() => {
                Ok(Record::new().with(VALUE_INDEX_FIELD, None))
            }
            Node::Map(_) => flat_record(entry),
            Node::List(_) => Err(entry.unexpected("a list entry")),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// `headers.row.cell` names the columns, `table.row[].cell[]` holds values
/// paired with them by position.
fn custom_action(response: &Located<'_>) -> Branch {
    let headers = header_names(&response.field("headers")?)?;
    let table = response.field("table")?;
    if table.node.is_empty_map() {
        return Ok(Vec::new());
    }
    let rows = table.field("row")?;

    let mut records = Vec::new();
    for row in rows.items() {
        let cells = row_cells(&row)?.items();
        if cells.len() != headers.len() {
            return Err(ShapeError::CellCount {
                path: row.path,
                headers: headers.len(),
                cells: cells.len(),
            }
            .into());
        }
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(&cells) {
            record.insert(header.clone(), cell.scalar()?);
        }
        records.push(record);
    }
    Ok(records)
}

/// Column names from the deepest header level. A repeated name would let a
/// later cell overwrite an earlier one, so it is a shape error.
fn header_names(headers: &Located<'_>) -> Shaped<Vec<String>> {
    let row = headers.field("row")?;
    let level = if matches!(row.node, Node::List(_)) {
        row.items().pop().ok_or_else(|| ShapeError::Missing {
            path: format!("{}[0]", row.path),
        })?
    } else {
        row
    };
    let mut names: Vec<String> = Vec::new();
    for cell in level.field("cell")?.items() {
        let Node::Text(name) = cell.node else {
            return Err(cell.unexpected("a header name"));
        };
        if names.contains(name) {
            return Err(ShapeError::DuplicateHeader {
                path: cell.path,
                name: name.clone(),
            });
        }
        names.push(name.clone());
    }
    Ok(names)
}

/// Cell content of a row: its `cell` field, or the row itself when the row
/// is a bare value.
fn row_cells<'a>(row: &Located<'a>) -> Shaped<Located<'a>> {
    match row.node {
        Node::Map(entries) if !entries.is_empty() => row.field("cell"),
        Node::Text(_) | Node::Map(_) => Ok(row.clone()),
        Node::List(_) => Err(row.unexpected("a row")),
    }
}

/// `table.row[]`: each row already names its fields.
fn default_query(response: &Located<'_>) -> Branch {
    let table = match response.field("table") {
        Ok(table) => table,
        Err(missing) => {
            return match response.node.get("message").and_then(Node::as_text) {
                Some(message) => Err(Failure::Service(format!("{SERVICE_ERROR_PREFIX}{message}"))),
                None => Err(missing.into()),
            };
        }
    };
    if table.node.is_empty_map() {
        return Ok(Vec::new());
    }
    let rows = table.field("row")?;
    let records = rows
        .items()
        .iter()
        .map(|row| match row.node {
            Node::Map(fields) if !fields.is_empty() => flat_record(row),
            _ => Err(row.unexpected("a record row")),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// A record from a mapping whose fields are all scalar.
fn flat_record(node: &Located<'_>) -> Shaped<Record> {
    node.node
        .entries()
        .iter()
        .map(|(key, value)| {
            let field = Located {
                node: value,
                path: join(&node.path, key),
            };
            field.scalar().map(|value| (key.clone(), value))
        })
        .collect()
}

/// A node together with where it was found, for error messages.
#[derive(Debug, Clone)]
struct Located<'a> {
    node: &'a Node,
    path: String,
}

impl<'a> Located<'a> {
    fn root(node: &'a Node) -> Self {
        Self {
            node,
            path: String::new(),
        }
    }

    fn field(&self, key: &str) -> Shaped<Located<'a>> {
        let path = join(&self.path, key);
        match self.node {
            Node::Map(_) => match self.node.get(key) {
                Some(node) => Ok(Located { node, path }),
                None => Err(ShapeError::Missing { path }),
            },
            _ => Err(self.unexpected("a record")),
        }
    }

    /// The node as a sequence: list items, or the node alone.
    fn items(&self) -> Vec<Located<'a>> {
        let indexed = matches!(self.node, Node::List(_));
        self.node
            .as_seq()
            .iter()
            .enumerate()
            .map(|(index, node)| Located {
                node,
                path: if indexed {
                    format!("{}[{index}]", self.path)
                } else {
                    self.path.clone()
                },
            })
            .collect()
    }

    /// A cell value: text, or null for an empty element.
    fn scalar(&self) -> Shaped<Option<String>> {
        match self.node {
            Node::Text(text) => Ok(Some(text.clone())),
            node if node.is_empty_map() => Ok(None),
            _ => Err(self.unexpected("a scalar value")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ShapeError {
        ShapeError::Unexpected {
            path: self.path.clone(),
            expected,
            found: self.node.kind(),
        }
    }
}

fn join(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

#[derive(Debug)]
enum ShapeError {
    Missing {
        path: String,
    },
    Unexpected {
        path: String,
        expected: &'static str,
        found: NodeKind,
    },
    CellCount {
        path: String,
        headers: usize,
        cells: usize,
    },
    DuplicateHeader {
        path: String,
        name: String,
    },
}

type Shaped<T> = std::result::Result<T, ShapeError>;
type Branch = std::result::Result<Vec<Record>, Failure>;

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "missing {path}"),
            Self::Unexpected {
                path,
                expected,
                found,
            } => write!(f, "expected {expected} at {path}, found {found}"),
            Self::CellCount {
                path,
                headers,
                cells,
            } => write!(f, "{cells} cells for {headers} headers at {path}"),
            Self::DuplicateHeader { path, name } => {
                write!(f, "header '{name}' repeated at {path}")
            }
        }
    }
}

enum Failure {
    /// Shape did not match; the response may still carry a message.
    Shape(ShapeError),
    /// The service reported an error in place of data.
    Service(String),
}

impl From<ShapeError> for Failure {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}
