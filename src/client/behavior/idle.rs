use crate::client::behavior::BehaviorTrait;

/// Where every run starts. Does nothing and is always finished.
#[derive(Debug, Default, Clone, Copy)]
pub struct Entry;

impl BehaviorTrait for Entry {}

/// Terminal state. No transition leaves it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exit;

impl BehaviorTrait for Exit {}
