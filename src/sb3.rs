//! Typed representation of the parts of `project.json` (or `sprite.json`) in the
//! `sb3` format that the converter reads. See <https://en.scratch-wiki.info/wiki/Scratch_File_Format>
//! for an informal description of the format. Everything else on a target is kept,
//! untyped, in `unknown`.
//!
//! Inputs, fields and the compressed literal arrays are positional tuples in
//! the file format; they're decoded into closed sum types here so that the
//! resolver can match on them exhaustively.

use crate::prelude::*;
use serde::Deserialize;
use serde_json::Value;

/// A scratch project
#[derive(Deserialize, Debug, Clone)]
pub struct Sb3Project {
    pub targets: Vec<Target>,
    #[serde(flatten)]
    pub unknown: BTreeMap<Box<str>, Value>,
}

/// The flat id → block map of a single target. Iteration order is the order
/// blocks appear in the source file.
pub type BlockMap = IndexMap<Box<str>, Block>;

/// A target (sprite or stage)
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default)]
    pub is_stage: bool,
    pub name: Box<str>,
    #[serde(default)]
    pub blocks: BlockMap,
    #[serde(flatten)]
    pub unknown: BTreeMap<Box<str>, Value>,
}

/// A scratch block - either a normal block or a top-level variable/list reporter
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Block {
    Normal(BlockInfo),
    Special(BlockArray),
}

impl Block {
    /// `None` for variable and list literals sitting directly in the block map
    pub fn block_info(&self) -> Option<&BlockInfo> {
        match self {
            Block::Normal(info) => Some(info),
            Block::Special(_) => None,
        }
    }
}

/// Represents a non-special block
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub opcode: Box<str>,
    #[serde(default)]
    pub next: Option<Box<str>>,
    #[serde(default)]
    pub parent: Option<Box<str>>,
    #[serde(default)]
    pub inputs: IndexMap<Box<str>, Input>,
    #[serde(default)]
    pub fields: IndexMap<Box<str>, Field>,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default)]
    pub top_level: bool,
    #[serde(default)]
    pub mutation: Option<Mutation>,
}

/// The `[typeTag, value, ...]` arrays scratch uses to inline primitive blocks.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Value")]
pub enum BlockArray {
    /// tags 4 to 8: number, positive number, whole number, integer, angle
    Number(Box<str>),
    /// tag 9
    Color(Box<str>),
    /// tag 10
    Text(Box<str>),
    /// tag 11. The id is optional; references resolve by name.
    Broadcast { name: Box<str>, id: Option<Box<str>> },
    /// tag 12
    Variable { name: Box<str>, id: Option<Box<str>> },
    /// tag 13
    List { name: Box<str>, id: Option<Box<str>> },
}

/// stringifies a scalar json value the way scratch would display it
fn scalar_string(value: &Value) -> Option<Box<str>> {
    match value {
        Value::String(s) => Some(s.as_str().into()),
        Value::Number(n) => Some(n.to_string().into()),
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.into()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl BlockArray {
    pub fn from_values(values: &[Value]) -> Option<Self> {
        let tag = values.first()?.as_u64()?;
        let value = scalar_string(values.get(1)?)?;
        let id = values.get(2).and_then(Value::as_str).map(Box::from);
        Some(match tag {
            4..=8 => Self::Number(value),
            9 => Self::Color(value),
            10 => Self::Text(value),
            11 => Self::Broadcast { name: value, id },
            12 => Self::Variable { name: value, id },
            13 => Self::List { name: value, id },
            _ => return None,
        })
    }
}

impl TryFrom<Value> for BlockArray {
    type Error = ConvertError;

    fn try_from(value: Value) -> ConvResult<Self> {
        match value {
            Value::Array(ref values) => Self::from_values(values)
                .ok_or_else(|| make_conv_err!(MalformedProject, "unrecognised block array {value}")),
            other => conv_bail!(MalformedProject, "expected a block array, got {other}"),
        }
    }
}

/// What an input slot holds in its primary position.
#[derive(Debug, Clone, PartialEq)]
pub enum InputPayload {
    /// the id of a (possibly shadow) block whose `parent` is the block holding this input
    Block(Box<str>),
    Array(BlockArray),
    /// an empty slot, e.g. an unfilled boolean input or an empty substack
    Empty,
    Unrecognised(Value),
}

impl From<Value> for InputPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(id) => Self::Block(id.into()),
            Value::Null => Self::Empty,
            Value::Array(ref values) => match BlockArray::from_values(values) {
                Some(array) => Self::Array(array),
                None => Self::Unrecognised(value),
            },
            other => Self::Unrecognised(other),
        }
    }
}

/// An input slot, by shadow state. See <https://en.scratch-wiki.info/wiki/Scratch_File_Format#Blocks>
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Value")]
pub enum Input {
    /// `[1, payload]` - a shadow that hasn't been covered by a reporter
    UnobscuredShadow(InputPayload),
    /// `[2, payload]` - no shadow at all
    NoShadow(InputPayload),
    /// `[3, payload, shadow]` - a reporter dropped on top of a shadow
    ObscuredShadow {
        payload: InputPayload,
        shadow: InputPayload,
    },
    Unrecognised(Value),
}

impl Input {
    /// the value that's actually visible in the slot
    pub fn payload(&self) -> Option<&InputPayload> {
        match self {
            Self::UnobscuredShadow(payload)
            | Self::NoShadow(payload)
            | Self::ObscuredShadow { payload, .. } => Some(payload),
            Self::Unrecognised(_) => None,
        }
    }

    /// ids of the blocks this slot holds, including a covered-up shadow
    pub fn block_ids(&self) -> impl Iterator<Item = &str> + '_ {
        let (payload, shadow) = match self {
            Self::UnobscuredShadow(payload) | Self::NoShadow(payload) => (Some(payload), None),
            Self::ObscuredShadow { payload, shadow } => (Some(payload), Some(shadow)),
            Self::Unrecognised(_) => (None, None),
        };
        payload.into_iter().chain(shadow).filter_map(|payload| match payload {
            InputPayload::Block(id) => Some(&**id),
            _ => None,
        })
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        let Value::Array(values) = value else {
            return Self::Unrecognised(value);
        };
        let mut items = values.iter().cloned();
        let state = items.next().and_then(|state| state.as_u64());
        let payload = items.next().map_or(InputPayload::Empty, InputPayload::from);
        match state {
            Some(1) => Self::UnobscuredShadow(payload),
            Some(2) => Self::NoShadow(payload),
            Some(3) => Self::ObscuredShadow {
                payload,
                shadow: items.next().map_or(InputPayload::Empty, InputPayload::from),
            },
            _ => Self::Unrecognised(Value::Array(values)),
        }
    }
}

/// The (default) value of a variable, or the value in a field
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum VarVal {
    Float(f64),
    Bool(bool),
    String(Box<str>),
}

impl fmt::Display for VarVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A field (rectangular slot / dropdown) in a block
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Value")]
pub enum Field {
    /// `[value]` or `[value, null]`
    Value(VarVal),
    /// `[name, id]` - names a variable, list or broadcast
    Reference { name: VarVal, id: Box<str> },
    Malformed(Value),
}

impl Field {
    pub fn value(&self) -> Option<&VarVal> {
        match self {
            Self::Value(value) | Self::Reference { name: value, .. } => Some(value),
            Self::Malformed(_) => None,
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        let parsed = match &value {
            Value::Array(items) if (1..=2).contains(&items.len()) => {
                let first = serde_json::from_value::<VarVal>(items[0].clone()).ok();
                match (first, items.get(1)) {
                    (Some(val), None | Some(Value::Null)) => Some(Self::Value(val)),
                    (Some(name), Some(Value::String(id))) => Some(Self::Reference {
                        name,
                        id: id.as_str().into(),
                    }),
                    _ => None,
                }
            }
            _ => None,
        };
        parsed.unwrap_or(Self::Malformed(value))
    }
}

/// Represents a mutation on a block. See <https://en.scratch-wiki.info/wiki/Scratch_File_Format#Mutations>
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mutation {
    /// ignored - should always be "mutation"
    #[serde(default)]
    pub tag_name: Box<str>,
    /// ignored - should always be []
    #[serde(default)]
    pub children: Vec<Value>,
    #[serde(flatten)]
    pub mutations: BTreeMap<Box<str>, Value>,
}

impl Mutation {
    pub fn string(&self, id: &str) -> ConvResult<&str> {
        match self.mutations.get(id) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => conv_bail!(MalformedMutation, "non-string {id} mutation: {other}"),
            None => conv_bail!(MalformedMutation, "missing {id} mutation"),
        }
    }

    /// Reads an array-of-strings mutation. Scratch stores these as a JSON
    /// encoded string (`"[\"a\",\"b\"]"`), but some editors write a real array.
    pub fn string_array(&self, id: &str) -> ConvResult<Box<[Box<str>]>> {
        let values = match self.mutations.get(id) {
            Some(Value::Array(values)) => values.clone(),
            Some(Value::String(encoded)) => serde_json::from_str::<Vec<Value>>(encoded)
                .map_err(|err| make_conv_err!(MalformedMutation, "malformed {id} array: {err}"))?,
            Some(other) => conv_bail!(MalformedMutation, "non-array {id} mutation: {other}"),
            None => conv_bail!(MalformedMutation, "missing {id} mutation"),
        };
        values
            .into_iter()
            .map(|val| match val {
                Value::String(s) => Ok(s.into_boxed_str()),
                other => conv_bail!(MalformedMutation, "non-string {id} member {other}"),
            })
            .collect()
    }
}

impl TryFrom<&str> for Sb3Project {
    type Error = ConvertError;

    fn try_from(string: &str) -> Result<Self, Self::Error> {
        use serde_json::error::Category;
        let sb3: Result<Self, serde_json::Error> = serde_json::from_str(string);
        match sb3 {
            Ok(proj) => Ok(proj),
            Err(err) => match err.classify() {
                Category::Syntax => conv_bail!(
                    MalformedProject,
                    "Invalid JSON syntax at project.json:{}:{}",
                    err.line(),
                    err.column()
                ),
                Category::Data => conv_bail!(
                    MalformedProject,
                    "Invalid project.json at project.json:{}:{} ({err})",
                    err.line(),
                    err.column()
                ),
                Category::Eof => conv_bail!(
                    MalformedProject,
                    "Unexpected end of file at project.json:{}:{}",
                    err.line(),
                    err.column()
                ),
                Category::Io => conv_bail!(MalformedProject, "Failed to deserialize json"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;

    #[test]
    fn inputs_decode_by_shadow_state() {
        let input: Input = serde_json::from_value(json!([1, [10, "hello"]])).unwrap();
        assert_eq!(
            input,
            Input::UnobscuredShadow(InputPayload::Array(BlockArray::Text("hello".into())))
        );

        let input: Input = serde_json::from_value(json!([2, "abc"])).unwrap();
        assert_eq!(input, Input::NoShadow(InputPayload::Block("abc".into())));

        let input: Input = serde_json::from_value(json!([3, [12, "score", "v1"], [4, "10"]])).unwrap();
        assert_eq!(
            input,
            Input::ObscuredShadow {
                payload: InputPayload::Array(BlockArray::Variable {
                    name: "score".into(),
                    id: Some("v1".into())
                }),
                shadow: InputPayload::Array(BlockArray::Number("10".into())),
            }
        );
    }

    #[test]
    fn odd_inputs_are_kept_rather_than_rejected() {
        let input: Input = serde_json::from_value(json!([1, null])).unwrap();
        assert_eq!(input.payload(), Some(&InputPayload::Empty));

        let input: Input = serde_json::from_value(json!([2, [99, "?"]])).unwrap();
        assert!(matches!(
            input.payload(),
            Some(InputPayload::Unrecognised(_))
        ));

        let input: Input = serde_json::from_value(json!([])).unwrap();
        assert!(matches!(input, Input::Unrecognised(_)));
    }

    #[test]
    fn numeric_literals_keep_their_text() {
        assert_eq!(
            BlockArray::from_values(&[json!(4), json!(10)]),
            Some(BlockArray::Number("10".into()))
        );
        assert_eq!(
            BlockArray::from_values(&[json!(8), json!("90")]),
            Some(BlockArray::Number("90".into()))
        );
        assert_eq!(
            BlockArray::from_values(&[json!(9), json!("#ff0000")]),
            Some(BlockArray::Color("#ff0000".into()))
        );
        assert_eq!(BlockArray::from_values(&[json!(99), json!("?")]), None);
    }

    #[test]
    fn references_may_leave_out_their_id() {
        assert_eq!(
            BlockArray::from_values(&[json!(11), json!("message1")]),
            Some(BlockArray::Broadcast {
                name: "message1".into(),
                id: None
            })
        );
        assert_eq!(
            BlockArray::from_values(&[json!(12), json!("score")]),
            Some(BlockArray::Variable {
                name: "score".into(),
                id: None
            })
        );
        assert_eq!(
            BlockArray::from_values(&[json!(13), json!("items"), json!("l1")]),
            Some(BlockArray::List {
                name: "items".into(),
                id: Some("l1".into())
            })
        );
    }

    #[test]
    fn input_block_ids_include_covered_shadows() {
        let input: Input = serde_json::from_value(json!([3, "reporter", "shadow"])).unwrap();
        assert_eq!(input.block_ids().collect::<Vec<_>>(), ["reporter", "shadow"]);
        let input: Input = serde_json::from_value(json!([3, "reporter", [4, "10"]])).unwrap();
        assert_eq!(input.block_ids().collect::<Vec<_>>(), ["reporter"]);
        let input: Input = serde_json::from_value(json!([1, [10, "hi"]])).unwrap();
        assert_eq!(input.block_ids().count(), 0);
    }

    #[test]
    fn fields_decode() {
        let field: Field = serde_json::from_value(json!(["all", null])).unwrap();
        assert_eq!(field, Field::Value(VarVal::String("all".into())));

        let field: Field = serde_json::from_value(json!(["my variable", "`jEk@4|i[#Fk?(8x)AV.-my variable"])).unwrap();
        assert!(matches!(field, Field::Reference { .. }));

        let field: Field = serde_json::from_value(json!(["lonely"])).unwrap();
        assert_eq!(field, Field::Value(VarVal::String("lonely".into())));

        let field: Field = serde_json::from_value(json!("not a tuple")).unwrap();
        assert!(matches!(field, Field::Malformed(_)));

        let field: Field = serde_json::from_value(json!(["a", "b", "c"])).unwrap();
        assert!(matches!(field, Field::Malformed(_)));
    }

    #[test]
    fn var_vals_display_like_scratch() {
        assert_eq!(VarVal::Float(10.0).to_string(), "10");
        assert_eq!(VarVal::Float(0.5).to_string(), "0.5");
        assert_eq!(VarVal::Bool(true).to_string(), "true");
    }

    #[test]
    fn mutation_string_arrays() {
        let mutation: Mutation = serde_json::from_value(json!({
            "tagName": "mutation",
            "children": [],
            "proccode": "my block %s %b",
            "argumentnames": "[\"text\",\"flag\"]",
            "argumentids": ["a", "b"],
            "warp": "false"
        }))
        .unwrap();
        assert_eq!(mutation.string("proccode").unwrap(), "my block %s %b");
        assert_eq!(
            &*mutation.string_array("argumentnames").unwrap(),
            &[Box::from("text"), Box::from("flag")]
        );
        assert_eq!(mutation.string_array("argumentids").unwrap().len(), 2);
        assert_eq!(
            mutation.string_array("warp").unwrap_err().kind,
            ConvertErrorKind::MalformedMutation
        );
        assert_eq!(
            mutation.string("argumentdefaults").unwrap_err().kind,
            ConvertErrorKind::MalformedMutation
        );
    }

    #[test]
    fn parses_project_preserving_block_order() {
        let project: Sb3Project = indoc! {r#"
            {
                "targets": [
                    {
                        "isStage": true,
                        "name": "Stage",
                        "variables": {},
                        "blocks": {
                            "zz": {"opcode": "event_whenflagclicked", "next": null, "parent": null,
                                   "inputs": {}, "fields": {}, "shadow": false, "topLevel": true, "x": 0, "y": 0},
                            "aa": [12, "score", "v1", 10, 20]
                        }
                    }
                ],
                "meta": {"semver": "3.0.0"}
            }
        "#}
        .try_into()
        .unwrap();
        let target = &project.targets[0];
        assert!(target.is_stage);
        assert!(target.unknown.contains_key("variables"));
        let ids: Vec<_> = target.blocks.keys().map(|k| &**k).collect();
        assert_eq!(ids, ["zz", "aa"]);
        assert!(matches!(
            target.blocks["aa"],
            Block::Special(BlockArray::Variable { .. })
        ));
        assert_eq!(
            target.blocks["zz"].block_info().unwrap().opcode.as_ref(),
            "event_whenflagclicked"
        );
    }

    #[test]
    fn bad_json_is_a_malformed_project() {
        let err = Sb3Project::try_from("{\"targets\": [").unwrap_err();
        assert_eq!(err.kind, ConvertErrorKind::MalformedProject);
        let err = Sb3Project::try_from("{\"targets\": 4}").unwrap_err();
        assert_eq!(err.kind, ConvertErrorKind::MalformedProject);
    }
}
