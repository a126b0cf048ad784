use crate::reference::ObjectReference;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "durationType", rename_all_fields = "camelCase")]
pub enum Duration {
    UntilEndOfTurn,
    UntilYourNextTurn,
    AsLongAs { condition: String },
    Permanent,
    UntilLeavesBattlefield { object: ObjectReference },
    UntilEndOfCombat,
    AtBeginningOfNextEndStep,
}
