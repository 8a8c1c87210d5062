pub mod declarations;
pub mod internships;
pub mod vehicles;
