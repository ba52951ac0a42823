pub mod texture_loader;
