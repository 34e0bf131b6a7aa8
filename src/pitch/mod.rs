pub mod autocorrelate;
