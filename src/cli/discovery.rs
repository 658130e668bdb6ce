//! Command discovery over a client's registration table

use super::client::{Callable, ClientObject, Member, Property};
use super::tree::Descriptor;

/// Public methods and generator methods of `obj`, ordered by name
///
/// Properties and fields are skipped; discovery never calls a getter.
pub fn find_client_commands(obj: &dyn ClientObject) -> Vec<Callable> {
    let mut commands: Vec<Callable> = obj
        .members()
        .into_iter()
        .filter(Member::is_public)
        .filter_map(|member| match member {
            Member::Method(callable) => Some(callable),
            Member::Property(_) | Member::Field(_) => None,
        })
        .collect();
    commands.sort_by(|a, b| a.name().cmp(b.name()));
    commands
}

/// Public properties of `obj`, ordered by name
///
/// These are the usual group candidates; they are listed, not invoked.
pub fn find_client_properties(obj: &dyn ClientObject) -> Vec<Property> {
    let mut properties: Vec<Property> = obj
        .members()
        .into_iter()
        .filter(Member::is_public)
        .filter_map(|member| match member {
            Member::Property(property) => Some(property),
            Member::Method(_) | Member::Field(_) => None,
        })
        .collect();
    properties.sort_by(|a, b| a.name().cmp(b.name()));
    properties
}

/// Leaf descriptors for every discovered command of `obj`
pub fn client_descriptors(obj: &dyn ClientObject) -> Vec<Descriptor> {
    find_client_commands(obj)
        .into_iter()
        .map(Descriptor::from)
        .collect()
}
