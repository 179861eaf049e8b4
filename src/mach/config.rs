/// ## Machine configuration

#[derive(Debug, Clone)]
pub struct Config {
    /// Size of the memory arena in bytes.
    pub memory: usize,
    /// Parameter stack capacity in cells.
    pub stack_cells: usize,
    /// Return stack capacity in cells.
    pub return_stack_cells: usize,
    /// Check both stacks for overflow and underflow. Without it a runaway
    /// stack still traps once it leaves its guard cells.
    pub checked: bool,
    /// Bold diagnostics on a terminal.
    pub styled: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            memory: 256 * 1024,
            stack_cells: 256,
            return_stack_cells: 256,
            checked: true,
            styled: false,
        }
    }
}
