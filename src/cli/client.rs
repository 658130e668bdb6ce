//! Client objects and their members
//!
//! A client object publishes its public surface as an explicit table of
//! [`Member`]s. Methods receive their receiver explicitly as a [`Context`], so
//! the same [`Callable`] can be bound to whichever object a parent group
//! produced at run time.

use super::arguments::Arguments;
use super::error::{CliError, CliResult};
use super::params::CommandSpec;
use anyhow::anyhow;
use serde::ser::{self, Impossible, Serialize, Serializer};
use serde_json::Value;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// The receiver passed down the command tree
pub type Context = Arc<dyn ClientObject>;

/// Function behind a callable member
pub type CallFn = Arc<dyn Fn(&Context, &Arguments) -> anyhow::Result<Returned> + Send + Sync>;

/// Type erasure helper so receivers can be downcast to their concrete type
pub trait AsAny {
    /// View as `Any`
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An object whose public members can be exposed as commands
///
/// # Example
///
/// ```
/// use clientcli::cli::{Callable, ClientObject, CommandSpec, Member, Returned};
/// use serde_json::json;
///
/// struct Client;
///
/// impl ClientObject for Client {
///     fn members(&self) -> Vec<Member> {
///         vec![Member::Method(Callable::method(
///             "ping",
///             CommandSpec::new().about("Check connectivity"),
///             |_ctx, _args| Returned::json(&json!({"ok": true})),
///         ))]
///     }
/// }
/// ```
pub trait ClientObject: AsAny + Send + Sync {
    /// Registration table of this object's members
    fn members(&self) -> Vec<Member>;
}

impl dyn ClientObject {
    /// Downcast to a concrete client type
    pub fn downcast_ref<T: ClientObject + 'static>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }
}

/// Borrow the receiver as a concrete client type
///
/// Fails when a member is bound to a receiver of a different type, which
/// happens when a descriptor tree pairs a method with the wrong group.
pub fn receiver<T: ClientObject + 'static>(ctx: &Context) -> anyhow::Result<&T> {
    ctx.downcast_ref::<T>()
        .ok_or_else(|| anyhow!("receiver is not a {}", type_name::<T>()))
}

/// What kind of callable a member is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// Returns a single value
    Method,
    /// Yields a sequence of values
    Generator,
}

/// A named callable bound to a receiver at invocation time
#[derive(Clone)]
pub struct Callable {
    name: String,
    kind: CallableKind,
    spec: CommandSpec,
    func: CallFn,
}

impl Callable {
    /// Create a method member
    pub fn method<F>(name: impl Into<String>, spec: CommandSpec, f: F) -> Self
    where
        F: Fn(&Context, &Arguments) -> anyhow::Result<Returned> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: CallableKind::Method,
            spec,
            func: Arc::new(f),
        }
    }

    /// Create a generator member; its items are collected when invoked
    pub fn generator<F, I>(name: impl Into<String>, spec: CommandSpec, f: F) -> Self
    where
        F: Fn(&Context, &Arguments) -> anyhow::Result<I> + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Serialize,
    {
        let func = move |ctx: &Context, args: &Arguments| -> anyhow::Result<Returned> {
            let items = f(ctx, args)?
                .into_iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Returned::Items(items))
        };
        Self {
            name: name.into(),
            kind: CallableKind::Generator,
            spec,
            func: Arc::new(func),
        }
    }

    /// Member name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Method or generator
    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    /// CLI-facing metadata
    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Replace the CLI-facing metadata
    pub fn with_spec(mut self, spec: CommandSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Invoke with an explicit receiver
    pub fn call(&self, receiver: &Context, args: &Arguments) -> anyhow::Result<Returned> {
        (self.func)(receiver, args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// A read-only property; only its getter is ever invoked
#[derive(Clone, Debug)]
pub struct Property {
    getter: Callable,
}

impl Property {
    /// Create a property from its getter
    pub fn new<F>(name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Context) -> anyhow::Result<Returned> + Send + Sync + 'static,
    {
        Self {
            getter: Callable::method(name, CommandSpec::new(), move |ctx, _args| getter(ctx)),
        }
    }

    /// Attach help text and other metadata to the getter
    pub fn with_spec(mut self, spec: CommandSpec) -> Self {
        self.getter = self.getter.with_spec(spec);
        self
    }

    /// Property name
    pub fn name(&self) -> &str {
        self.getter.name()
    }

    /// The getter, as a callable taking only the receiver
    pub fn getter(&self) -> &Callable {
        &self.getter
    }
}

/// A single entry in a client's registration table
#[derive(Clone, Debug)]
pub enum Member {
    /// A method or generator method
    Method(Callable),
    /// A property getter
    Property(Property),
    /// A plain data attribute; never exposed as a command
    Field(String),
}

impl Member {
    /// Member name
    pub fn name(&self) -> &str {
        match self {
            Member::Method(callable) => callable.name(),
            Member::Property(property) => property.name(),
            Member::Field(name) => name,
        }
    }

    /// Names starting with an underscore are private
    pub fn is_public(&self) -> bool {
        !self.name().starts_with('_')
    }
}

/// The member a descriptor points at
#[derive(Clone, Debug)]
pub enum Target {
    /// A method or generator
    Method(Callable),
    /// A property, reduced to its getter when built
    Property(Property),
}

impl Target {
    /// Name of the underlying member
    pub fn name(&self) -> &str {
        match self {
            Target::Method(callable) => callable.name(),
            Target::Property(property) => property.name(),
        }
    }

    /// The callable that actually runs
    ///
    /// A property getter takes nothing but its receiver, so a getter that
    /// declares parameters is rejected.
    pub fn into_callable(self) -> CliResult<Callable> {
        match self {
            Target::Method(callable) => Ok(callable),
            Target::Property(property) => {
                if !property.getter.spec().params.is_empty() {
                    return Err(CliError::descriptor(format!(
                        "property '{}' declares parameters; property getters only take their receiver",
                        property.name()
                    )));
                }
                Ok(property.getter)
            }
        }
    }
}

impl From<Callable> for Target {
    fn from(callable: Callable) -> Self {
        Target::Method(callable)
    }
}

impl From<Property> for Target {
    fn from(property: Property) -> Self {
        Target::Property(property)
    }
}

/// Result of invoking a member
#[derive(Clone)]
pub enum Returned {
    /// No value; nothing is printed
    None,
    /// A JSON value
    Json(Value),
    /// Items yielded by a generator
    Items(Vec<Value>),
    /// A new client object, used as the receiver of child commands
    Context(Context),
}

impl Returned {
    /// Serialize any value; `null` becomes [`Returned::None`]
    ///
    /// A non-finite float has no JSON form and fails with
    /// [`CliError::Serialization`] instead of being printed as nothing.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<Self> {
        match serde_json::to_value(value).map_err(CliError::from)? {
            Value::Null => match value.serialize(BareFloat) {
                Ok(Some(number)) if !number.is_finite() => Err(CliError::Serialization(
                    format!("{} is not JSON serializable", number),
                )
                .into()),
                _ => Ok(Returned::None),
            },
            value => Ok(Returned::Json(value)),
        }
    }

    /// Wrap a client object
    pub fn context<T: ClientObject + 'static>(client: T) -> Self {
        Returned::Context(Arc::new(client))
    }

    /// True when nothing should be printed
    pub fn is_none(&self) -> bool {
        matches!(self, Returned::None | Returned::Json(Value::Null))
    }

    /// The client object, if this is one
    pub fn into_context(self) -> Option<Context> {
        match self {
            Returned::Context(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// The JSON value, if this is one
    pub fn as_json(&self) -> Option<Value> {
        match self {
            Returned::Json(value) => Some(value.clone()),
            Returned::Items(items) => Some(Value::Array(items.clone())),
            Returned::None | Returned::Context(_) => None,
        }
    }

    /// Compact JSON text for output, or `None` for null results
    pub fn to_json_line(&self) -> CliResult<Option<String>> {
        match self {
            Returned::None | Returned::Json(Value::Null) => Ok(None),
            Returned::Json(value) => Ok(Some(serde_json::to_string(value)?)),
            Returned::Items(items) => Ok(Some(serde_json::to_string(items)?)),
            Returned::Context(_) => Err(CliError::Serialization(
                "a client object is not JSON serializable".to_string(),
            )),
        }
    }
}

impl fmt::Debug for Returned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Returned::None => write!(f, "None"),
            Returned::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Returned::Items(items) => f.debug_tuple("Items").field(items).finish(),
            Returned::Context(_) => write!(f, "Context(..)"),
        }
    }
}

/// Reports the top-level float of a value, if it is one
///
/// `serde_json` maps NaN and infinities to `null`; this tells them apart
/// from a genuine null.
struct BareFloat;

#[derive(Debug)]
struct NotAFloat;

impl fmt::Display for NotAFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a float")
    }
}

impl std::error::Error for NotAFloat {}

impl ser::Error for NotAFloat {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        NotAFloat
    }
}

macro_rules! not_a_float {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<Self::Ok, Self::Error> {
                Ok(None)
            }
        )*
    };
}

impl Serializer for BareFloat {
    type Ok = Option<f64>;
    type Error = NotAFloat;
    type SerializeSeq = Impossible<Self::Ok, Self::Error>;
    type SerializeTuple = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = Impossible<Self::Ok, Self::Error>;
    type SerializeStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    not_a_float! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        Ok(Some(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        Ok(Some(v))
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(NotAFloat)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(NotAFloat)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(NotAFloat)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(NotAFloat)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(NotAFloat)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Err(NotAFloat)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(NotAFloat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Accounts;

    impl ClientObject for Accounts {
        fn members(&self) -> Vec<Member> {
            Vec::new()
        }
    }

    #[derive(Debug)]
    struct Other;

    impl ClientObject for Other {
        fn members(&self) -> Vec<Member> {
            Vec::new()
        }
    }

    #[test]
    fn test_receiver_downcast() {
        let ctx: Context = Arc::new(Accounts);
        assert!(receiver::<Accounts>(&ctx).is_ok());

        let err = receiver::<Other>(&ctx).unwrap_err();
        assert!(err.to_string().contains("Other"));
    }

    #[test]
    fn test_returned_json_null_is_none() {
        let returned = Returned::json(&Option::<u32>::None).unwrap();
        assert!(returned.is_none());
        assert_eq!(returned.to_json_line().unwrap(), None);
    }

    #[test]
    fn test_returned_json_non_finite_is_serialization_error() {
        for value in [f64::NAN, f64::INFINITY] {
            let err = Returned::json(&value).err().unwrap();
            assert!(matches!(
                err.downcast_ref::<CliError>(),
                Some(CliError::Serialization(_))
            ));
        }
        assert!(Returned::json(&Some(f64::NEG_INFINITY)).is_err());
        assert!(Returned::json(&Option::<f64>::None).unwrap().is_none());
        assert_eq!(Returned::json(&1.5).unwrap().as_json(), Some(json!(1.5)));
    }

    #[test]
    fn test_returned_json_line_is_compact() {
        let returned = Returned::json(&json!([{"id": 1}])).unwrap();
        assert_eq!(returned.to_json_line().unwrap().as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn test_context_is_not_serializable() {
        let returned = Returned::context(Accounts);
        assert!(matches!(
            returned.to_json_line(),
            Err(CliError::Serialization(_))
        ));
    }

    #[test]
    fn test_generator_collects_items() {
        let gen = Callable::generator("ids", CommandSpec::new(), |_ctx, _args| {
            Ok((1..=3).map(|id| json!({ "id": id })))
        });
        assert_eq!(gen.kind(), CallableKind::Generator);

        let ctx: Context = Arc::new(Accounts);
        let returned = gen.call(&ctx, &Arguments::new()).unwrap();
        assert_eq!(
            returned.as_json(),
            Some(json!([{"id": 1}, {"id": 2}, {"id": 3}]))
        );
    }

    #[test]
    fn test_property_with_params_is_rejected() {
        let property = Property::new("accounts", |_ctx| Ok(Returned::context(Accounts)))
            .with_spec(CommandSpec::new().param(crate::cli::ParamSpec::argument("id")));

        let result = Target::from(property).into_callable();
        assert!(matches!(result, Err(CliError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_private_member() {
        assert!(!Member::Field("_session".to_string()).is_public());
        assert!(Member::Field("version".to_string()).is_public());
    }
}
