pub mod index;
pub mod loader;
pub mod resolver;
pub mod translate;

pub use index::GazetteerIndex;
pub use loader::load_from_dir;
pub use resolver::CityResolver;
pub use translate::Translator;
