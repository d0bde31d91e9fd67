//! File types for the three generated artifacts.
//!
//! Each file is composed from small fragment functions in a fixed order;
//! every option flag gates one fragment.

mod mapper_java;
mod mapper_xml;
mod model_java;

pub use mapper_java::MapperJava;
pub use mapper_xml::MapperXml;
pub use model_java::ModelJava;
