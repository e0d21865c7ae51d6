pub mod rcdom;
