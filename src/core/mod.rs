pub mod body;
pub mod camera;
pub mod frame_counter;
pub mod image_data;
pub mod model_asset;
pub mod paths;
pub mod scene;
