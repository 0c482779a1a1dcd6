mod signin;
mod signup;

pub use signin::signin;
pub use signup::signup;
