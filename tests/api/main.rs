mod cors;
mod health_check;
mod not_found;
mod waitlist;
