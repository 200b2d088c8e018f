mod orbit;
