//! Assignee field resolution

use crate::models::{AssigneeRef, DeploymentType, Identity};
use crate::{Error, Result};

/// Build the assignee reference for `identity` in the scheme `deployment` expects.
///
/// Cloud takes the account id, Server and Data Center take the user name and then the legacy
/// key. When the preferred field is missing (or the deployment is unknown) the first present
/// of account id, name, key is used.
pub fn resolve_assignee(identity: &Identity, deployment: DeploymentType) -> Result<AssigneeRef> {
    let account_id = identity.account_id.clone().map(AssigneeRef::AccountId);
    let name = identity.name.clone().map(AssigneeRef::Name);
    let key = identity.key.clone().map(AssigneeRef::Key);

    let preferred = match deployment {
        DeploymentType::Cloud => account_id.clone(),
        d if d.is_self_hosted() => name.clone().or_else(|| key.clone()),
        _ => None,
    };

    preferred
        .or(account_id)
        .or(name)
        .or(key)
        .ok_or(Error::AssigneeUnresolved)
}
