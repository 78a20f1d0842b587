mod gate;
mod lane;
mod work_item;

pub(crate) use lane::SuspendableLane;
pub(crate) use work_item::{WorkItem, WorkItemHandle};
