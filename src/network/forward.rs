use super::*;

impl NeuraNetwork {
    /// Sets the outputs of the input units, in the order in which they were created
    pub fn set_input(&mut self, values: &[f64]) -> Result<(), NeuraNetworkErr> {
        NeuraNetworkErr::check_dimensions(self.input_layer.len(), values.len())?;

        for (&id, &value) in self.input_layer.iter().zip(values) {
            self.units[id.index()].set_output(value);
        }

        Ok(())
    }

    /// Computes the output of every hidden and output unit, layer by layer.
    ///
    /// Since every unit only reads from the previous layer, a single pass is enough.
    pub fn forward(&mut self) {
        for layer in self.hidden_layers.iter().chain(std::iter::once(&self.output_layer)) {
            for &id in layer {
                let unit = &self.units[id.index()];
                let output = unit.activation().eval(unit.net_input(&self.units));
                self.units[id.index()].set_output(output);
            }
        }
    }

    /// Returns the outputs of the output units, in layer order
    pub fn get_output(&self) -> Vec<f64> {
        self.output_layer
            .iter()
            .map(|id| self.units[id.index()].output())
            .collect()
    }

    /// Shorthand for `set_input`, `forward` and `get_output`
    pub fn eval(&mut self, values: &[f64]) -> Result<Vec<f64>, NeuraNetworkErr> {
        self.set_input(values)?;
        self.forward();
        Ok(self.get_output())
    }
}
