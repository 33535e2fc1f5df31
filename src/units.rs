#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub u8);
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub u8);
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Floors(pub u8);

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsCount(pub usize);
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct PassagesCount(pub usize);

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct FloorIndex(pub u8);
