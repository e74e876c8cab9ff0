pub mod dataset_reader;
pub mod observation_reader;

pub use dataset_reader::DatasetReader;
pub use observation_reader::ObservationReader;
