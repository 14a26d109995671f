//! `state_enum!`: a unit-only enum plus its [`State`](crate::core::State) impl.

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// Variants listed under `final:` end the machine. The generated enum is
/// `Copy`, hashable and serializable, and exposes every variant through
/// `VARIANTS`. Extra attributes, `#[derive(Default)]` with a `#[default]`
/// variant included, pass through.
///
/// ```
/// use artisan_storefront::core::State;
/// use artisan_storefront::state_enum;
///
/// state_enum! {
///     pub enum Delivery {
///         Packing,
///         OnTheRoad,
///         Delivered,
///         Returned,
///     }
///     final: [Delivered, Returned]
/// }
///
/// assert_eq!(Delivery::OnTheRoad.name(), "OnTheRoad");
/// assert!(Delivery::Returned.is_final());
/// assert_eq!(Delivery::VARIANTS.len(), 4);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant in declaration order.
            #[allow(dead_code)]
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
