mod common;
mod office;
mod receipts;
