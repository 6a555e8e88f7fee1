pub mod rest_directory;
