mod health_check;
mod home;
