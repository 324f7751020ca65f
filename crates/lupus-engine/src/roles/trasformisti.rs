use lupus_core::{Action, ActsAtNight, NightResult, PlayerId, ResultKind, RoleId, UsageLimit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{living_target, village};
use super::{MITOMANE, MUTAFORMA};
use crate::access::RoleAccess;
use crate::role::RoleDefinition;

pub(super) fn mitomane() -> RoleDefinition {
    village(MITOMANE, "Mitomane")
        .with_description("Once, becomes whatever role a chosen player holds.")
        .acting(ActsAtNight::Alive, 8)
        .with_usage(UsageLimit::Times(1))
        .with_resolve(imitate)
}

pub(super) fn mutaforma() -> RoleDefinition {
    village(MUTAFORMA, "Mutaforma")
        .with_description("Borrows another player's night action for one night.")
        .acting(ActsAtNight::Alive, 9)
        .with_resolve(shapeshift)
        .with_restore(undo_borrowed)
}

fn imitate(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    let copied = access.player(target)?.role_id.clone();
    if copied == MITOMANE {
        return None;
    }
    let def = access.definition(copied.as_str())?;
    if !access.change_role(action.player_id, def.id) {
        return None;
    }
    Some(
        access
            .result(ResultKind::Transformation, action)
            .with_target(target)
            .with_field("newRole", def.id),
    )
}

/// Roles borrowed tonight whose restore hooks still have to run.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Borrowed {
    roles: Vec<RoleId>,
}

/// `targetIds` is `[copyFrom, actOn, ..]`: borrow the action of the role held
/// by `copyFrom` and aim it at `actOn`. Any further targets and the rest of
/// the payload go to the borrowed action unchanged.
fn shapeshift(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let targets = action.target_ids();
    let [copy_from, rest @ ..] = targets.as_slice() else {
        return None;
    };
    let (copy_from, act_on) = (*copy_from, *rest.first()?);
    if copy_from == action.player_id {
        return None;
    }
    let copied = access.player(copy_from)?.role_id.clone();
    let result = access
        .result(ResultKind::Impersonation, action)
        .with_target(act_on)
        .with_field("copiedRole", copied.as_str());

    let borrowed = match borrowable(access, copy_from, copied.as_str()) {
        Ok(def) => def,
        Err(reason) => {
            return Some(
                result
                    .with_field("canUseRole", false)
                    .with_field("reason", reason),
            );
        }
    };
    let resolve = borrowed.resolve?;
    let borrowed_action = action.clone().with_target(act_on).with_targets(rest);
    let effect = resolve(&mut access.borrowing(borrowed.id), &borrowed_action)?;
    if borrowed.restore.is_some() {
        let mut pending: Borrowed = access.data().unwrap_or_default();
        if !pending.roles.iter().any(|r| *r == borrowed.id) {
            pending.roles.push(RoleId::from(borrowed.id));
        }
        access.set_data(&pending);
    }
    let effect = serde_json::to_value(effect).unwrap_or(Value::Null);
    Some(
        result
            .with_field("canUseRole", true)
            .with_field("actingRole", borrowed.id)
            .with_field("effect", effect),
    )
}

fn undo_borrowed(access: &mut RoleAccess<'_>) {
    let pending: Borrowed = access.data().unwrap_or_default();
    for role in &pending.roles {
        let Some(def) = access.definition(role.as_str()) else {
            continue;
        };
        if let Some(restore) = def.restore {
            restore(&mut access.borrowing(def.id));
        }
    }
    access.clear_custom_data();
}

/// The role whose action may be borrowed from `holder`, or why none can be.
fn borrowable<'a>(
    access: &RoleAccess<'a>,
    holder: PlayerId,
    role: &str,
) -> Result<&'a RoleDefinition, String> {
    if role == MUTAFORMA {
        return Err("cannot copy another shapeshifter".to_string());
    }
    let def = access
        .definition(role)
        .ok_or_else(|| format!("unknown role {role}"))?;
    if def.resolve.is_some() && access.view().is_role_eligible(role, holder) {
        return Ok(def);
    }
    access
        .view()
        .groupings()
        .acting_role_for(role)
        .and_then(|from| access.definition(from.as_str()))
        .filter(|acting| acting.resolve.is_some())
        .ok_or_else(|| format!("{role} cannot act tonight"))
}
