//! Typed projection of an entity's components.
//!
//! A data descriptor is a type implementing [`Fetch`]: `&T` for a shared
//! reference, `&mut T` for a mutable one, and tuples of those for several
//! components. The tuple order is the order the handler receives them in,
//! whatever order the model stores them in.
//!
//! ```text
//! (&Velocity, &mut Position)  ->  (&'a Velocity, &'a mut Position)
//! ```

use ecs_component::{Component, ComponentMeta, EntityModel, Has, Slots};

/// A data descriptor over entity model `M`.
///
/// Every projected type must be declared by `M` (`M: Has<T>`), so asking
/// for a component the model cannot hold is a compile error.
pub trait Fetch<M: EntityModel> {
    /// What the handler receives for one entity.
    type Item<'a>;

    /// Appends the projected component types, in projection order.
    fn components(out: &mut Vec<ComponentMeta>);

    /// Takes this descriptor's components out of `slots`.
    ///
    /// Returns `None` if a component is absent or was already taken.
    fn fetch<'a>(slots: &mut Slots<'a>) -> Option<Self::Item<'a>>;
}

impl<M, T> Fetch<M> for &T
where
    M: Has<T>,
    T: Component,
{
    type Item<'a> = &'a T;

    fn components(out: &mut Vec<ComponentMeta>) {
        out.push(T::meta());
    }

    fn fetch<'a>(slots: &mut Slots<'a>) -> Option<&'a T> {
        slots.take_typed::<T>().map(|value| &*value)
    }
}

impl<M, T> Fetch<M> for &mut T
where
    M: Has<T>,
    T: Component,
{
    type Item<'a> = &'a mut T;

    fn components(out: &mut Vec<ComponentMeta>) {
        out.push(T::meta());
    }

    fn fetch<'a>(slots: &mut Slots<'a>) -> Option<&'a mut T> {
        slots.take_typed::<T>()
    }
}

macro_rules! impl_fetch_tuple {
    ($($name:ident),+) => {
        impl<M: EntityModel, $($name: Fetch<M>),+> Fetch<M> for ($($name,)+) {
            type Item<'a> = ($(<$name as Fetch<M>>::Item<'a>,)+);

            fn components(out: &mut Vec<ComponentMeta>) {
                $( <$name as Fetch<M>>::components(out); )+
            }

            fn fetch<'a>(slots: &mut Slots<'a>) -> Option<Self::Item<'a>> {
                Some(($( <$name as Fetch<M>>::fetch(slots)?, )+))
            }
        }
    };
}

impl_fetch_tuple!(A);
impl_fetch_tuple!(A, B);
impl_fetch_tuple!(A, B, C);
impl_fetch_tuple!(A, B, C, D);
impl_fetch_tuple!(A, B, C, D, E);
impl_fetch_tuple!(A, B, C, D, E, F);
impl_fetch_tuple!(A, B, C, D, E, F, G);
impl_fetch_tuple!(A, B, C, D, E, F, G, H);

/// The component types projected by `D`, in projection order.
#[must_use]
pub fn data_components<M: EntityModel, D: Fetch<M>>() -> Vec<ComponentMeta> {
    let mut out = Vec::new();
    D::components(&mut out);
    out
}
