mod decode_error;
pub use decode_error::*;

mod dot3_error;
pub use dot3_error::*;

mod layer;
pub use layer::*;

mod len_error;
pub use len_error::*;

mod len_source;
pub use len_source::*;

mod table_error;
pub use table_error::*;

mod value_error;
pub use value_error::*;
