//! Resolve a 4-byte selector against an ordered list of interfaces.

use revertkit_core::{ErrorFragment, Interface, Selector};

/// The interface, signature and fragment a selector resolved to.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub interface: Option<&'a Interface>,
    pub signature: &'a str,
    pub fragment: &'a ErrorFragment,
}

/// Find the first fragment whose selector equals `selector`.
///
/// Interfaces are searched in the order given, fragments in declaration
/// order. Colliding selectors cannot be told apart; the first wins.
pub fn resolve<'a, I>(interfaces: I, selector: Selector) -> Option<Resolved<'a>>
where
    I: IntoIterator<Item = &'a Interface>,
{
    interfaces.into_iter().find_map(|iface| {
        iface
            .errors()
            .iter()
            .find(|fragment| fragment.selector() == selector)
            .map(|fragment| Resolved {
                interface: Some(iface),
                signature: fragment.signature(),
                fragment,
            })
    })
}
