use kernel::id::Id;

pub struct RoleMarker;
pub type RoleId = Id<RoleMarker>;
