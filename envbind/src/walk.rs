//! The struct walker: resolves each registered field's variable and binds it.

use std::fmt;
use std::fs;

use serde::Serialize;
use tracing::{debug, trace};

use crate::coerce;
use crate::error::EnvError;
use crate::kind::{EnvField, FieldRef, Kind};
use crate::lookup::{Lookup, ProcessEnv};
use crate::name::derive_key;
use crate::tag::{parse_tag, TagOptions};

/// Tag option making a field optional.
pub const OMITEMPTY: &str = "omitempty";

/// Tag option enabling the `{KEY}_FILE` fallback.
pub const FILE: &str = "file";

/// A struct whose fields can be bound from the environment.
///
/// Usually implemented with `#[derive(EnvBind)]`.
pub trait EnvStruct {
    /// The struct's fields in declaration order.
    ///
    /// Fields of flattened (embedded) structs are promoted in place, as if
    /// they were declared at this level.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Descriptor of a single field, built during a walk and dropped after it.
pub struct Field<'a> {
    ident: &'static str,
    tag: Option<&'static str>,
    promoted: bool,
    value: Option<String>,
    slot: FieldRef<'a>,
}

impl<'a> Field<'a> {
    pub fn new<T: EnvField + ?Sized>(
        ident: &'static str,
        tag: Option<&'static str>,
        target: &'a mut T,
    ) -> Self {
        Self {
            ident,
            tag,
            promoted: false,
            value: None,
            slot: target.field_ref(),
        }
    }

    /// Mark the field as promoted from an embedded struct.
    pub fn promoted(mut self) -> Self {
        self.promoted = true;
        self
    }

    /// Rust identifier of the field, as written in the struct.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Raw `#[env = "..."]` tag, if the field has one.
    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// Whether the field was promoted from a `#[env(flatten)]` struct.
    pub fn is_promoted(&self) -> bool {
        self.promoted
    }

    /// Raw value resolved for the field, once the walk has looked it up.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    pub fn options(&self) -> TagOptions<'static> {
        parse_tag(self.tag.unwrap_or_default()).1
    }

    /// The environment variable the field reads from.
    ///
    /// The tag's name when present, the identifier split at case
    /// transitions otherwise; upper-cased in both cases.
    pub fn key(&self) -> String {
        let (name, _) = parse_tag(self.tag.unwrap_or_default());
        if name.is_empty() {
            derive_key(self.ident)
        } else {
            name.to_uppercase()
        }
    }

    pub fn is_required(&self) -> bool {
        !self.options().contains(OMITEMPTY)
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Field name: {}, envVar: {}, type: {}, required: {}",
            self.ident(),
            self.key(),
            self.kind(),
            self.is_required()
        )?;
        match self.value() {
            // File-backed values are secrets
            Some(_) if self.options().contains(FILE) => f.write_str(", value: <redacted>")?,
            Some(value) => write!(f, ", value: {value:?}")?,
            None => {}
        }
        if self.is_promoted() {
            f.write_str(", promoted: true")?;
        }
        f.write_str(" />")
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("ident", &self.ident)
            .field("tag", &self.tag)
            .field("promoted", &self.promoted)
            .field("resolved", &self.value.is_some())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Bind the process environment into `target`.
///
/// # Errors
///
/// Returns the first failure of the walk; see [`parse_with`].
pub fn parse<T: EnvField + ?Sized>(target: &mut T) -> Result<(), EnvError> {
    parse_with(target, &ProcessEnv)
}

/// Bind variables from `provider` into `target`.
///
/// Fields are visited in declaration order and nested structs are walked
/// recursively. The walk stops at the first error; fields bound before it
/// keep their new values.
///
/// # Errors
///
/// - `target` is not a registered struct
/// - A field's kind is not supported
/// - A required variable is not set
/// - A value cannot be coerced into its field's kind
/// - A `{KEY}_FILE` path cannot be read
pub fn parse_with<T, L>(target: &mut T, provider: &L) -> Result<(), EnvError>
where
    T: EnvField + ?Sized,
    L: Lookup + ?Sized,
{
    match target.field_ref() {
        FieldRef::Struct(inner) => parse_struct(inner, provider),
        other => Err(EnvError::NotAStruct { kind: other.kind() }),
    }
}

/// Build a `T` from its default value and the process environment.
///
/// # Errors
///
/// See [`parse_with`].
pub fn from_env<T: EnvField + Default>() -> Result<T, EnvError> {
    let mut config = T::default();
    parse(&mut config)?;
    Ok(config)
}

fn parse_struct<L: Lookup + ?Sized>(
    target: &mut dyn EnvStruct,
    provider: &L,
) -> Result<(), EnvError> {
    for field in target.fields() {
        parse_field(field, provider)?;
    }
    Ok(())
}

/// Bind a single field, recursing into nested structs.
///
/// A missing required variable is reported before an unsupported kind, so
/// an unset `Box`/`Option`/`Vec` field fails with `MissingRequiredVariable`.
pub fn parse_field<L: Lookup + ?Sized>(
    mut field: Field<'_>,
    provider: &L,
) -> Result<(), EnvError> {
    let ident = field.ident();

    if let FieldRef::Struct(inner) = field.slot {
        trace!(field = ident, "walking nested struct");
        return parse_struct(inner, provider);
    }

    let key = field.key();
    let required = field.is_required();
    debug!(%field, "binding field");

    let value = match resolve(&key, field.options(), provider)? {
        Some(value) => value,
        None if required => return Err(EnvError::missing(key, ident)),
        None => {
            debug!(field = ident, key = %key, "optional variable not set, coercing empty value");
            String::new()
        }
    };
    field.value = Some(value);
    debug!(%field, "resolved field");

    let Field { slot, value, .. } = field;
    coerce::coerce(slot, value.as_deref().unwrap_or_default())
        .map_err(|e| EnvError::from_coerce(ident, key, e))
}

/// Fetch the raw value for `key`, falling back to `{KEY}_FILE` when the
/// field carries the `file` option.
fn resolve<L: Lookup + ?Sized>(
    key: &str,
    options: TagOptions<'_>,
    provider: &L,
) -> Result<Option<String>, EnvError> {
    if let Some(value) = provider.lookup(key) {
        return Ok(Some(value));
    }

    if options.contains(FILE) {
        let file_key = format!("{key}_FILE");
        if let Some(path) = provider.lookup(&file_key) {
            debug!(key = %file_key, path = %path, "reading variable from file");
            return fs::read_to_string(&path)
                .map(|s| Some(s.trim().to_string()))
                .map_err(|source| EnvError::FileRead {
                    key: file_key,
                    path,
                    source,
                });
        }
    }

    Ok(None)
}

/// One variable a struct reads, as listed by [`describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarSpec {
    /// Identifier of the field
    pub field: String,
    /// Environment variable name
    pub key: String,
    /// Kind the value is coerced into
    pub kind: Kind,
    /// Whether the variable must be set
    pub required: bool,
    /// Whether `{KEY}_FILE` is consulted
    pub file: bool,
}

/// List the variables `target` reads, without consulting any environment.
///
/// Leaves are listed in the order the walker visits them.
///
/// # Errors
///
/// Fails like [`parse_with`] when `target` is not a struct or contains a
/// field of an unsupported kind.
pub fn describe<T: EnvField + ?Sized>(target: &mut T) -> Result<Vec<VarSpec>, EnvError> {
    match target.field_ref() {
        FieldRef::Struct(inner) => {
            let mut specs = Vec::new();
            describe_struct(inner, &mut specs)?;
            Ok(specs)
        }
        other => Err(EnvError::NotAStruct { kind: other.kind() }),
    }
}

fn describe_struct(target: &mut dyn EnvStruct, specs: &mut Vec<VarSpec>) -> Result<(), EnvError> {
    for field in target.fields() {
        let spec = VarSpec {
            field: field.ident.to_string(),
            key: field.key(),
            kind: field.kind(),
            required: field.is_required(),
            file: field.options().contains(FILE),
        };

        match field.slot {
            FieldRef::Struct(inner) => describe_struct(inner, specs)?,
            FieldRef::Unsupported(kind) => {
                return Err(EnvError::UnsupportedKind {
                    field: spec.field,
                    kind,
                });
            }
            _ => specs.push(spec),
        }
    }
    Ok(())
}
