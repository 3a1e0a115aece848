//! Domain object upkeep shared by both services

use ipm_profile::ProfileCatalog;
use ipm_store::{HAS_CHILD, ObjectId, ObjectStore, Relationship};

use crate::Result;

/// Record the hierarchy between two domain objects once.
pub(crate) fn link_child(store: &mut dyn ObjectStore, parent: ObjectId, child: ObjectId) -> Result<()> {
    if !store.has_relationship(parent, HAS_CHILD, child)? {
        store.add_relationship(Relationship::new(parent, HAS_CHILD, child))?;
    }
    Ok(())
}

/// Drop values `node_type` does not admit or that exceed its maximum.
///
/// Surviving values keep their order. Returns how many were dropped.
pub(crate) fn conform_properties(
    catalog: &ProfileCatalog,
    store: &mut dyn ObjectStore,
    oid: ObjectId,
    node_type: &str,
) -> Result<usize> {
    let values = store.get_properties(oid)?;
    let mut names: Vec<&str> = Vec::new();
    for value in &values {
        if !names.contains(&value.property.as_str()) {
            names.push(&value.property);
        }
    }

    let mut dropped = 0;
    for name in names {
        let present = values.iter().filter(|v| v.property == name).count();
        match catalog.constraint(node_type, name) {
            None => {
                store.remove_property(oid, name, None)?;
                dropped += present;
            }
            Some(constraint) => {
                let Some(max) = constraint.max else {
                    continue;
                };
                if present > max as usize {
                    let kept = values
                        .iter()
                        .filter(|v| v.property == name)
                        .take(max as usize)
                        .cloned()
                        .collect();
                    store.replace_property(oid, name, kept)?;
                    dropped += present - max as usize;
                }
            }
        }
    }
    Ok(dropped)
}
