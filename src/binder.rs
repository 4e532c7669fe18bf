use std::fmt::{Debug, Formatter};

use crate::error::{BindError, Error};
use crate::model::{Document, Entry};
use crate::parser::{parse_bytes, parse_str};
use crate::scalar::{EnvField, FieldKind, Scalar, coerce};

type Setter<T> = Box<dyn Fn(&mut T, Scalar) -> Option<()> + Send + Sync>;

/// A record type that can be filled from a [`Document`].
///
/// Implement it by hand with the [`Bindings`] builder, or with
/// [`impl_bind!`](crate::impl_bind).
pub trait Bind: Sized + 'static {
    fn bindings() -> Bindings<Self>;
}

/// One destination field: its name, optional source-key tag, kind and setter.
pub struct FieldBinding<T> {
    name: &'static str,
    tag: Option<&'static str>,
    kind: FieldKind,
    setter: Setter<T>,
}

impl<T> FieldBinding<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The tag verbatim, otherwise the lowercased then uppercased name.
    fn lookup<'d>(&self, document: &'d Document) -> Option<&'d Entry> {
        match self.tag {
            Some(tag) => document.get_entry(tag),
            None => document
                .get_entry(&self.name.to_lowercase())
                .or_else(|| document.get_entry(&self.name.to_uppercase())),
        }
    }

    fn bind(&self, document: &Document, dest: &mut T) -> Result<(), BindError> {
        let entry = self.lookup(document).ok_or_else(|| BindError::UndefinedKey {
            field: self.name.to_owned(),
        })?;
        tracing::trace!(field = self.name, key = entry.key(), "binding field");

        let kind = match self.kind {
            FieldKind::Scalar(kind) => kind,
            FieldKind::Unsupported(type_name) => {
                return Err(BindError::UnsupportedType {
                    field: self.name.to_owned(),
                    type_name,
                });
            }
        };

        let invalid_number = || BindError::InvalidNumber {
            field: self.name.to_owned(),
            value: entry.value().to_owned(),
        };
        let scalar = coerce(kind, entry.value()).map_err(|_| invalid_number())?;
        (self.setter)(dest, scalar).ok_or_else(invalid_number)
    }
}

impl<T> Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Builder-style table of the fields a record binds, in binding order.
///
/// Fields that are never declared are left untouched. A field declared with
/// an empty name is skipped.
pub struct Bindings<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T: 'static> Bindings<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a field looked up by its lowercased, then uppercased, name.
    pub fn field<F>(self, name: &'static str, access: fn(&mut T) -> &mut F) -> Self
    where
        F: EnvField + 'static,
    {
        self.declare(name, None, access)
    }

    /// Bind a field looked up by an explicit source key.
    pub fn tagged<F>(
        self,
        name: &'static str,
        tag: &'static str,
        access: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: EnvField + 'static,
    {
        self.declare(name, Some(tag), access)
    }

    pub fn declare<F>(
        mut self,
        name: &'static str,
        tag: Option<&'static str>,
        access: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: EnvField + 'static,
    {
        self.fields.push(FieldBinding {
            name,
            tag,
            kind: F::KIND,
            setter: Box::new(move |dest: &mut T, scalar: Scalar| {
                *access(dest) = F::from_scalar(scalar)?;
                Some(())
            }),
        });
        self
    }
}

impl<T> Bindings<T> {
    pub fn fields(&self) -> &[FieldBinding<T>] {
        &self.fields
    }

    /// Fill `dest` from `document`, field by field.
    ///
    /// Stops at the first failing field; fields before it stay written.
    pub fn apply(&self, document: &Document, dest: &mut T) -> Result<(), BindError> {
        self.check_unique()?;

        let mut bound = 0usize;
        for field in self.fields.iter().filter(|field| !field.name.is_empty()) {
            field.bind(document, dest)?;
            bound += 1;
        }

        tracing::debug!(
            destination = std::any::type_name::<T>(),
            fields = bound,
            "bound dotenv document"
        );
        Ok(())
    }

    fn check_unique(&self) -> Result<(), BindError> {
        for (idx, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                continue;
            }
            if self.fields[..idx].iter().any(|prev| prev.name == field.name) {
                return Err(BindError::InvalidDestination {
                    type_name: std::any::type_name::<T>(),
                    field: field.name.to_owned(),
                });
            }
        }
        Ok(())
    }
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> Debug for Bindings<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Fill `dest` from an already parsed document.
///
/// The binding table is rebuilt from [`Bind::bindings`] on every call. To
/// bind many documents into the same type, build the table once and call
/// [`Bindings::apply`] directly.
pub fn bind<T: Bind>(document: &Document, dest: &mut T) -> Result<(), BindError> {
    T::bindings().apply(document, dest)
}

/// Build a fresh `T` from an already parsed document.
pub fn from_document<T: Bind + Default>(document: &Document) -> Result<T, BindError> {
    let mut dest = T::default();
    bind(document, &mut dest)?;
    Ok(dest)
}

/// Parse UTF-8 text and bind it into a fresh `T`.
pub fn from_str<T: Bind + Default>(input: &str) -> Result<T, Error> {
    let document = parse_str(input)?;
    Ok(from_document(&document)?)
}

/// Parse UTF-8 bytes and bind them into a fresh `T`.
pub fn from_bytes<T: Bind + Default>(input: &[u8]) -> Result<T, Error> {
    let document = parse_bytes(input)?;
    Ok(from_document(&document)?)
}

/// Implement [`Bind`](crate::Bind) for a struct by listing the fields to bind.
///
/// Each field is looked up by its name (lowercase, then uppercase) unless it
/// is followed by `= "key"`, which names the source key explicitly. Fields
/// not listed are never touched.
///
/// ```
/// #[derive(Debug, Default)]
/// struct Config {
///     host: String,
///     port: u16,
///     db: String,
/// }
///
/// envbind::impl_bind!(Config { host, port, db = "db_name" });
///
/// let config: Config = envbind::from_str("HOST=localhost\nport=5432\ndb_name=app\n").unwrap();
/// assert_eq!(config.port, 5432);
/// assert_eq!(config.db, "app");
/// ```
#[macro_export]
macro_rules! impl_bind {
    ($ty:ty { $($field:ident $(= $tag:literal)?),* $(,)? }) => {
        impl $crate::Bind for $ty {
            fn bindings() -> $crate::Bindings<Self> {
                $crate::Bindings::<Self>::new()
                    $(.declare(
                        stringify!($field),
                        None $(.or(Some($tag)))?,
                        |dest: &mut $ty| &mut dest.$field,
                    ))*
            }
        }
    };
}
