//! Call Graph Protocol
//!
//! Read side of the whole-program call graph, as consumed by reporting and
//! diagnostics.

pub trait CallGraphProvider {
    /// Functions called by `func_name`, in first-call order
    fn get_callees(&self, func_name: &str) -> Vec<String>;

    fn get_functions(&self) -> Vec<String>;

    fn get_callers(&self, _func_name: &str) -> Vec<String> {
        Vec::new()
    }

    fn contains_function(&self, func_name: &str) -> bool {
        self.get_functions().iter().any(|f| f == func_name)
    }

    fn num_functions(&self) -> usize {
        self.get_functions().len()
    }
}
