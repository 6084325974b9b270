use crate::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Switch {
    On,
    #[default]
    Off,
}

impl Switch {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlagInfo {
    /// a human-readable name for the flag
    pub name: String,
    pub description: String,
    pub ty: String,
}

impl FlagInfo {
    fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            ty: String::new(),
        }
    }

    fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn with_ty(mut self, ty: &str) -> Self {
        self.ty = ty.to_string();
        self
    }
}

/// stringifies the name of a type whilst ensuring that the type is valid
macro_rules! ty_str {
    ($ty:ty) => {{
        let _ = core::any::TypeId::of::<$ty>(); // forces the type to be valid
        stringify!($ty)
    }};
}

/// conversion flags. Every flag defaults to `Off`.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertFlags {
    pub strict_inputs: Switch,
    pub check_procedure_calls: Switch,
}

impl ConvertFlags {
    pub const FLAGS: [&'static str; 2] = ["strict_inputs", "check_procedure_calls"];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// every check switched on
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_inputs: Switch::On,
            check_procedure_calls: Switch::On,
        }
    }

    pub fn from_json(json: &str) -> ConvResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| make_conv_err!(InvalidFlags, "couldn't read conversion flags: {err}"))
    }

    #[must_use]
    pub fn flag_info(flag: &str) -> FlagInfo {
        match flag {
            "strict_inputs" => FlagInfo::new()
                .with_name("Strict inputs")
                .with_description(
                    "On - input slots that are empty or hold something unrecognisable are an error.\n\
                    Off - they become a literal of type 'unknown' with an empty value.",
                )
                .with_ty(ty_str!(Switch)),
            "check_procedure_calls" => FlagInfo::new()
                .with_name("Check procedure calls")
                .with_description(
                    "On - every custom block call must match a definition in the same sprite, \
                    with the same number of arguments.\n\
                    Off - calls are linked to definitions by proccode only, and never checked.",
                )
                .with_ty(ty_str!(Switch)),
            _ => FlagInfo::new().with_name(format!("unknown setting '{flag}'").as_str()),
        }
    }
}
