//! Declaration macros for records and persistable enums.

/// Implements [`Record`](crate::Record) for a struct.
///
/// Each `"Key" => field` pair maps a storage key to a struct field whose
/// type implements [`FieldType`](crate::FieldType).  Keys are stored in the
/// order listed.  Add `notify <field>` to name an embedded
/// [`ChangeNotifier`](crate::ChangeNotifier) and enable write-through.
///
/// ```rust
/// use propsync_core::{record, ChangeNotifier, Record};
///
/// #[derive(Default)]
/// pub struct ExampleConfig {
///     pub example_int: i32,
///     pub example_string: String,
/// }
///
/// record! {
///     ExampleConfig in "ExampleConfig" {
///         "ExampleInt" => example_int,
///         "ExampleString" => example_string,
///     }
/// }
///
/// #[derive(Default)]
/// pub struct Window {
///     width: i32,
///     changes: ChangeNotifier<Window>,
/// }
///
/// record! {
///     Window in "Window" notify changes {
///         "Width" => width,
///     }
/// }
///
/// assert_eq!(ExampleConfig::fields().len(), 2);
/// assert!(Window::default().change_notifier().is_some());
/// ```
#[macro_export]
macro_rules! record {
    (
        $ty:ident in $section:literal {
            $($key:literal => $field:ident),* $(,)?
        }
    ) => {
        impl $crate::Record for $ty {
            const SECTION: &'static str = $section;

            fn fields() -> ::std::vec::Vec<$crate::FieldDescriptor<Self>> {
                ::std::vec![
                    $($crate::FieldDescriptor::<Self>::typed($key, |r| &r.$field, |r| &mut r.$field)),*
                ]
            }
        }
    };
    (
        $ty:ident in $section:literal notify $notifier:ident {
            $($key:literal => $field:ident),* $(,)?
        }
    ) => {
        impl $crate::Record for $ty {
            const SECTION: &'static str = $section;

            fn fields() -> ::std::vec::Vec<$crate::FieldDescriptor<Self>> {
                ::std::vec![
                    $($crate::FieldDescriptor::<Self>::typed($key, |r| &r.$field, |r| &mut r.$field)),*
                ]
            }

            fn change_notifier(&mut self) -> ::std::option::Option<&mut $crate::ChangeNotifier<Self>> {
                ::std::option::Option::Some(&mut self.$notifier)
            }
        }
    };
}

/// Implements [`FieldType`](crate::FieldType) for a unit-only enum.
///
/// Members are stored by name.  The first listed member is what empty text
/// decodes to, so list the enum's default first.
///
/// ```rust
/// use propsync_core::{enum_field, FieldType, SemanticType, Value};
///
/// #[derive(Debug, Clone, Copy, Default, PartialEq)]
/// pub enum Theme {
///     #[default]
///     Light,
///     Dark,
/// }
///
/// enum_field!(Theme { Light, Dark });
///
/// assert_eq!(Theme::Dark.to_value(), Value::Enum("Dark"));
/// assert_eq!(Theme::from_value(Value::Enum("Light")), Some(Theme::Light));
/// assert!(matches!(Theme::semantic_type(), SemanticType::Enum { name: "Theme", .. }));
/// ```
#[macro_export]
macro_rules! enum_field {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::FieldType for $ty {
            fn semantic_type() -> $crate::SemanticType {
                $crate::SemanticType::Enum {
                    name: ::std::stringify!($ty),
                    members: &[$(::std::stringify!($variant)),+],
                }
            }

            fn to_value(&self) -> $crate::Value {
                match self {
                    $($ty::$variant => $crate::Value::Enum(::std::stringify!($variant)),)+
                }
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                match value {
                    $crate::Value::Enum(member) => match member {
                        $(::std::stringify!($variant) => ::std::option::Option::Some($ty::$variant),)+
                        _ => ::std::option::Option::None,
                    },
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
