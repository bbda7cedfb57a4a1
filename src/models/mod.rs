pub mod bilingual;
pub mod enums;
pub mod results;

pub use bilingual::*;
pub use enums::*;
pub use results::*;
